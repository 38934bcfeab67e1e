use glam::{Vec2, Vec3};

use crate::config::{MapConfig, MapInfo};
use crate::geom::WallPolygon;
use crate::map::{Map, Sidedef};
use crate::textures::TextureCatalog;
use crate::visual::sector::SectorDataCache;
use crate::visual::texplane::TexturePlane;

/// Final output unit handed to the renderer: produced once per rebuild,
/// never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldVertex {
    pub pos: Vec3,
    pub uv: Vec2,
    pub color: u32,
    pub fog: f32,
}

/// Everything a wall-part rebuild or texture edit reaches for. The map is
/// mutable because texture edits write sidedef attributes; `setup` itself
/// only reads it.
pub struct EditContext<'a> {
    pub map: &'a mut Map,
    pub cache: &'a mut SectorDataCache,
    pub catalog: &'a TextureCatalog,
    pub config: &'a MapConfig,
    pub mapinfo: &'a MapInfo,
}

/// Which surface extents a texture-fit edit should match.
#[derive(Clone, Copy, Debug)]
pub struct FitTextureOptions {
    pub fit_width: bool,
    pub fit_height: bool,
}

impl Default for FitTextureOptions {
    fn default() -> Self {
        FitTextureOptions {
            fit_width: true,
            fit_height: true,
        }
    }
}

/// Common contract of the upper/middle/lower wall-part builders.
///
/// `setup` returns `true` when visible geometry was produced; "no
/// geometry" is a normal outcome, not an error. All texture edits are
/// synchronous and re-run `setup` themselves where the contract says so.
pub trait WallPart {
    fn setup(&mut self, ctx: &mut EditContext<'_>) -> bool;
    fn vertices(&self) -> &[WorldVertex];

    fn texture_name<'m>(&self, map: &'m Map) -> &'m str;
    fn set_texture(&mut self, ctx: &mut EditContext<'_>, name: &str);
    fn set_texture_offset_x(&mut self, map: &mut Map, px: i32);
    fn set_texture_offset_y(&mut self, map: &mut Map, px: i32);
    fn move_texture_offset(&mut self, ctx: &mut EditContext<'_>, dx: i32, dy: i32);
    fn texture_offset(&self, map: &Map) -> (i32, i32);
    fn reset_texture_scale(&mut self, map: &mut Map);
    fn fit_texture(&mut self, ctx: &mut EditContext<'_>, options: FitTextureOptions);
}

/// Light override of a sidedef: the relative delta (or absolute level)
/// plus whether it is absolute.
pub fn get_light_value(sd: &Sidedef) -> (i32, bool) {
    (
        sd.fields.get_f64("light", 0.0) as i32,
        sd.fields.get_bool("lightabsolute"),
    )
}

/// Project every surviving fragment through the texture plane and attach
/// the per-segment fog weight. Fragment colours were assigned at
/// polygon-build time.
pub fn create_polygon_vertices(
    polys: &[WallPolygon],
    tp: &TexturePlane,
    fog: f32,
) -> Vec<WorldVertex> {
    let mut verts = Vec::with_capacity(polys.iter().map(|p| p.len()).sum());
    for poly in polys {
        for &p in &poly.points {
            let uv = tp.texture_coords_at(p);
            verts.push(WorldVertex {
                pos: p.as_vec3(),
                uv: uv.as_vec2(),
                color: poly.color,
                fog,
            });
        }
    }
    verts
}

/// Offset arithmetic shared by all parts: adding a delta wraps into the
/// texture extent when one is known, otherwise plain addition. The sign
/// of the stored value follows the dividend, as the reference editor's
/// arithmetic does.
pub fn wrapped_offset(old: f64, delta: i32, size: f64) -> f64 {
    let sum = old + delta as f64;
    if size > 0.0 { sum % size } else { sum }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
