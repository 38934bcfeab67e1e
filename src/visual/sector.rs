use std::collections::HashMap;

use log::debug;

use crate::geom::{ExtraFloor, Plane};
use crate::map::{Map, SectorId};
use crate::visual::color::PixelColor;

/// Per-sector derived state the wall builders read: resolved floor and
/// ceiling planes, the ambient light term for walls below the ceiling,
/// and the sector's 3-D floor slabs.
///
/// Kept in a [`SectorDataCache`] and recomputed pull-based: any edit that
/// touches the sector's heights or flags calls `invalidate`, the next
/// reader recomputes.
#[derive(Clone, Debug)]
pub struct SectorData {
    pub floor: Plane,
    pub ceiling: Plane,
    pub brightness_below: i32,
    pub color_below: PixelColor,
    pub extra_floors: Vec<ExtraFloor>,
    pub updated: bool,
}

impl SectorData {
    fn stale() -> Self {
        SectorData {
            floor: Plane::flat(0.0),
            ceiling: Plane::flat(0.0),
            brightness_below: 0,
            color_below: PixelColor::from_int(0xFFFFFFFF),
            extra_floors: Vec::new(),
            updated: false,
        }
    }

    /// Recompute every field from current map state. Idempotent; a bad
    /// sector id leaves the safe defaults in place (fail closed).
    pub fn update(&mut self, map: &Map, sector_id: SectorId) {
        if let Ok(sec) = map.sector(sector_id) {
            self.floor = sec.floor_slope.unwrap_or_else(|| Plane::flat(sec.floor_h));
            self.ceiling = sec.ceil_slope.unwrap_or_else(|| Plane::flat(sec.ceil_h));
            self.brightness_below = sec.light as i32;
            self.color_below = PixelColor::from_int(sec.light_color).with_alpha(255);
            self.extra_floors = sec
                .extra_floors
                .iter()
                .map(|&(top_h, bottom_h)| ExtraFloor {
                    top: Plane::flat(top_h),
                    bottom: Plane::flat(bottom_h),
                })
                .collect();
        }
        self.updated = true;
    }
}

/// Cache of [`SectorData`] keyed by sector identity.
///
/// Single-threaded: writers invalidate on the editing thread, the next
/// reader recomputes; last writer wins.
#[derive(Debug, Default)]
pub struct SectorDataCache {
    data: HashMap<SectorId, SectorData>,
}

impl SectorDataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the derived data for `sector_id`, recomputing it first when
    /// stale or missing.
    pub fn get_or_update(&mut self, map: &Map, sector_id: SectorId) -> &SectorData {
        let entry = self.data.entry(sector_id).or_insert_with(SectorData::stale);
        if !entry.updated {
            debug!("recomputing sector data for sector {sector_id}");
            entry.update(map, sector_id);
        }
        entry
    }

    /// Mark one sector's derived data stale after an edit.
    pub fn invalidate(&mut self, sector_id: SectorId) {
        if let Some(entry) = self.data.get_mut(&sector_id) {
            entry.updated = false;
        }
    }

    pub fn invalidate_all(&mut self) {
        for entry in self.data.values_mut() {
            entry.updated = false;
        }
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{MapFormat, Sector};
    use glam::DVec2;

    fn one_sector_map() -> Map {
        let mut map = Map::new(MapFormat::Udmf);
        let mut sec = Sector::new(16.0, 192.0, 144);
        sec.extra_floors.push((128.0, 96.0));
        map.sectors.push(sec);
        map
    }

    #[test]
    fn update_resolves_planes_and_light() {
        let map = one_sector_map();
        let mut cache = SectorDataCache::new();
        let sd = cache.get_or_update(&map, 0);
        assert_eq!(sd.floor.get_z(DVec2::ZERO), 16.0);
        assert_eq!(sd.ceiling.get_z(DVec2::ZERO), 192.0);
        assert_eq!(sd.brightness_below, 144);
        assert_eq!(sd.extra_floors.len(), 1);
        assert!(sd.updated);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let mut map = one_sector_map();
        let mut cache = SectorDataCache::new();
        assert_eq!(cache.get_or_update(&map, 0).ceiling.get_z(DVec2::ZERO), 192.0);

        // Edit the sector; stale data must survive until invalidated.
        map.sectors[0].ceil_h = 256.0;
        assert_eq!(cache.get_or_update(&map, 0).ceiling.get_z(DVec2::ZERO), 192.0);

        cache.invalidate(0);
        assert_eq!(cache.get_or_update(&map, 0).ceiling.get_z(DVec2::ZERO), 256.0);
    }

    #[test]
    fn bad_sector_fails_closed() {
        let map = Map::new(MapFormat::Doom);
        let mut cache = SectorDataCache::new();
        let sd = cache.get_or_update(&map, 7);
        assert!(sd.updated);
        assert_eq!(sd.floor.get_z(DVec2::ZERO), 0.0);
    }
}
