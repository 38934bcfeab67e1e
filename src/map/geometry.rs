use bitflags::bitflags;
use glam::DVec2;

use crate::geom::Plane;
use crate::map::FieldMap;

pub type VertexId = u16;
pub type LinedefId = u16;
pub type SidedefId = u16;
pub type SectorId = u16;

/// Reserved texture name meaning "no texture assigned".
pub const NO_TEXTURE_NAME: &str = "-";

/*--------------------------- linedefs -------------------------------*/

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LinedefFlags: u16 {
        const IMPASSABLE      = 0x0001;
        const BLOCK_MONSTERS  = 0x0002;
        const TWO_SIDED       = 0x0004;
        const UPPER_UNPEGGED  = 0x0010;
        const LOWER_UNPEGGED  = 0x0020;
        const SECRET          = 0x0040;
        const BLOCK_SOUND     = 0x0080;
        const NOT_ON_MAP      = 0x0200;
    }
}

#[derive(Clone, Debug)]
pub struct Linedef {
    pub v1: VertexId,
    pub v2: VertexId,
    pub flags: LinedefFlags,
    pub front: Option<SidedefId>,
    pub back: Option<SidedefId>,
}

/*--------------------------- sidedefs -------------------------------*/

/// One side of a map edge, carrying its own texture assignment.
///
/// `offset_x`/`offset_y` are the classic per-sidedef pixel offsets shared
/// by all three parts; the per-part offsets and scales live in `fields`.
#[derive(Clone, Debug)]
pub struct Sidedef {
    pub linedef: LinedefId,
    pub is_front: bool,
    pub sector: SectorId,
    pub offset_x: i32,
    pub offset_y: i32,
    pub upper: String,
    pub middle: String,
    pub lower: String,
    pub fields: FieldMap,
}

impl Sidedef {
    pub fn has_upper_texture(&self) -> bool {
        self.upper != NO_TEXTURE_NAME && !self.upper.is_empty()
    }
}

/*----------------------- simple primitives --------------------------*/

#[derive(Clone, Copy, Debug)]
pub struct Vertex {
    pub pos: DVec2,
}

/*---------------------------- sectors -------------------------------*/

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SectorFlags: u16 {
        const SKY_CEILING = 0x0001;
        const SKY_FLOOR   = 0x0002;
    }
}

/// An editable sector. Slope planes override the flat heights when set;
/// `extra_floors` holds the editor-resolved `(top_h, bottom_h)` pairs of
/// every 3-D floor inside this sector, top-down.
#[derive(Clone, Debug)]
pub struct Sector {
    pub floor_h: f64,
    pub ceil_h: f64,
    pub floor_slope: Option<Plane>,
    pub ceil_slope: Option<Plane>,
    pub light: i16,
    pub light_color: u32,
    pub flags: SectorFlags,
    pub extra_floors: Vec<(f64, f64)>,
}

impl Sector {
    pub fn new(floor_h: f64, ceil_h: f64, light: i16) -> Self {
        Sector {
            floor_h,
            ceil_h,
            floor_slope: None,
            ceil_slope: None,
            light,
            light_color: 0x00FF_FFFF,
            flags: SectorFlags::empty(),
            extra_floors: Vec::new(),
        }
    }

    pub fn has_sky_ceiling(&self) -> bool {
        self.flags.contains(SectorFlags::SKY_CEILING)
    }
}

/*------------------------------ map ---------------------------------*/

/// Which map format the edited map uses. Texture-fit editing is a UDMF
/// feature; the classic formats have no per-part fields to store it in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapFormat {
    Doom,
    Hexen,
    Udmf,
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("sidedef id {0} out of range")]
    BadSidedef(SidedefId),

    #[error("sector id {0} out of range")]
    BadSector(SectorId),

    #[error("linedef id {0} out of range")]
    BadLinedef(LinedefId),
}

/// The editable map the wall builders operate on.
#[derive(Debug, Default)]
pub struct Map {
    pub format: MapFormat,
    pub vertices: Vec<Vertex>,
    pub linedefs: Vec<Linedef>,
    pub sidedefs: Vec<Sidedef>,
    pub sectors: Vec<Sector>,
}

impl Default for MapFormat {
    fn default() -> Self {
        MapFormat::Udmf
    }
}

impl Map {
    pub fn new(format: MapFormat) -> Self {
        Map {
            format,
            ..Default::default()
        }
    }

    pub fn is_udmf(&self) -> bool {
        self.format == MapFormat::Udmf
    }

    pub fn sidedef(&self, sid: SidedefId) -> Result<&Sidedef, MapError> {
        self.sidedefs
            .get(sid as usize)
            .ok_or(MapError::BadSidedef(sid))
    }

    pub fn sidedef_mut(&mut self, sid: SidedefId) -> Result<&mut Sidedef, MapError> {
        self.sidedefs
            .get_mut(sid as usize)
            .ok_or(MapError::BadSidedef(sid))
    }

    pub fn sector(&self, sid: SectorId) -> Result<&Sector, MapError> {
        self.sectors
            .get(sid as usize)
            .ok_or(MapError::BadSector(sid))
    }

    pub fn linedef(&self, lid: LinedefId) -> Result<&Linedef, MapError> {
        self.linedefs
            .get(lid as usize)
            .ok_or(MapError::BadLinedef(lid))
    }

    /// The sidedef across the same linedef, if the line is two-sided.
    pub fn other_side(&self, sid: SidedefId) -> Option<SidedefId> {
        let sd = self.sidedefs.get(sid as usize)?;
        let ld = self.linedefs.get(sd.linedef as usize)?;
        if sd.is_front { ld.back } else { ld.front }
    }

    /// Left/right edge points of a sidedef, oriented so the visible face
    /// is to the right of left→right. The back side walks the line in
    /// reverse.
    pub fn side_edge_points(&self, sid: SidedefId) -> Result<(DVec2, DVec2), MapError> {
        let sd = self.sidedef(sid)?;
        let ld = self.linedef(sd.linedef)?;
        let p1 = self.vertices[ld.v1 as usize].pos;
        let p2 = self.vertices[ld.v2 as usize].pos;
        Ok(if sd.is_front { (p1, p2) } else { (p2, p1) })
    }

    pub fn line_length(&self, lid: LinedefId) -> Result<f64, MapError> {
        let ld = self.linedef(lid)?;
        let p1 = self.vertices[ld.v1 as usize].pos;
        let p2 = self.vertices[ld.v2 as usize].pos;
        Ok((p2 - p1).length())
    }

    pub fn line_center(&self, lid: LinedefId) -> Result<DVec2, MapError> {
        let ld = self.linedef(lid)?;
        let p1 = self.vertices[ld.v1 as usize].pos;
        let p2 = self.vertices[ld.v2 as usize].pos;
        Ok((p1 + p2) * 0.5)
    }

    /// True when this sidedef needs an upper texture: the neighbour's
    /// ceiling is below the owning sector's ceiling.
    pub fn high_required(&self, sid: SidedefId) -> bool {
        let Some(other) = self.other_side(sid) else {
            return false;
        };
        let (Ok(sd), Ok(osd)) = (self.sidedef(sid), self.sidedef(other)) else {
            return false;
        };
        let (Ok(sec), Ok(osec)) = (self.sector(sd.sector), self.sector(osd.sector)) else {
            return false;
        };
        osec.ceil_h < sec.ceil_h
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn two_sector_map() -> Map {
        let mut map = Map::new(MapFormat::Udmf);
        map.vertices = vec![
            Vertex { pos: dvec2(0.0, 0.0) },
            Vertex { pos: dvec2(64.0, 0.0) },
        ];
        map.sectors = vec![Sector::new(0.0, 128.0, 192), Sector::new(0.0, 64.0, 160)];
        map.sidedefs = vec![
            Sidedef {
                linedef: 0,
                is_front: true,
                sector: 0,
                offset_x: 0,
                offset_y: 0,
                upper: "STARTAN2".into(),
                middle: NO_TEXTURE_NAME.into(),
                lower: NO_TEXTURE_NAME.into(),
                fields: FieldMap::new(),
            },
            Sidedef {
                linedef: 0,
                is_front: false,
                sector: 1,
                offset_x: 0,
                offset_y: 0,
                upper: NO_TEXTURE_NAME.into(),
                middle: NO_TEXTURE_NAME.into(),
                lower: NO_TEXTURE_NAME.into(),
                fields: FieldMap::new(),
            },
        ];
        map.linedefs = vec![Linedef {
            v1: 0,
            v2: 1,
            flags: LinedefFlags::TWO_SIDED,
            front: Some(0),
            back: Some(1),
        }];
        map
    }

    #[test]
    fn edge_points_follow_side() {
        let map = two_sector_map();
        let (l, r) = map.side_edge_points(0).unwrap();
        assert_eq!((l, r), (dvec2(0.0, 0.0), dvec2(64.0, 0.0)));
        let (l, r) = map.side_edge_points(1).unwrap();
        assert_eq!((l, r), (dvec2(64.0, 0.0), dvec2(0.0, 0.0)));
    }

    #[test]
    fn other_side_crosses_the_line() {
        let map = two_sector_map();
        assert_eq!(map.other_side(0), Some(1));
        assert_eq!(map.other_side(1), Some(0));
    }

    #[test]
    fn high_required_follows_ceiling_heights() {
        let mut map = two_sector_map();
        assert!(map.high_required(0)); // 128 over 64
        assert!(!map.high_required(1)); // 64 under 128
        map.sectors[1].ceil_h = 128.0;
        assert!(!map.high_required(0));
    }

    #[test]
    fn bad_ids_are_reported() {
        let map = two_sector_map();
        assert!(matches!(map.sidedef(9), Err(MapError::BadSidedef(9))));
        assert!(matches!(map.sector(9), Err(MapError::BadSector(9))));
    }
}
