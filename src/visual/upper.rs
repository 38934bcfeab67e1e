use glam::{DVec2, dvec2, dvec3};
use log::{debug, warn};

use crate::geom::{Plane, WallPolygon, clip_extra_floors, crop_against_plane};
use crate::map::{LinedefFlags, Map, NO_TEXTURE_NAME, SidedefId};
use crate::textures::{MISSING_TEXTURE, TextureId, UNKNOWN_TEXTURE};
use crate::visual::color::{PixelColor, brightness_color, fog_factor, wall_brightness};
use crate::visual::texplane::TexturePlane;
use crate::visual::wall::{
    EditContext, FitTextureOptions, WallPart, WorldVertex, create_polygon_vertices,
    get_light_value, wrapped_offset,
};

const FIELD_OFFSET_X: &str = "offsetx_top";
const FIELD_OFFSET_Y: &str = "offsety_top";
const FIELD_SCALE_X: &str = "scalex_top";
const FIELD_SCALE_Y: &str = "scaley_top";

/// Builder for the upper wall part of one sidedef: the strip between the
/// owning sector's ceiling and the neighbour's lower ceiling.
///
/// One instance per sidedef, rebuilt in place by [`UpperWall::setup`]
/// whenever an edit touches anything it reads. Between rebuilds it also
/// holds the advisory sky flag, the one-shot deferred-texture marker and
/// the cached bounding planes sibling builders intersect against.
pub struct UpperWall {
    sidedef: SidedefId,
    vertices: Vec<WorldVertex>,
    pub texture: TextureId,
    pub render_as_sky: bool,
    pub fog: f32,
    setup_on_loaded: Option<String>,
    top: Plane,
    bottom: Plane,
}

impl UpperWall {
    pub fn new(sidedef: SidedefId) -> Self {
        UpperWall {
            sidedef,
            vertices: Vec::new(),
            texture: MISSING_TEXTURE,
            render_as_sky: false,
            fog: 0.0,
            setup_on_loaded: None,
            top: Plane::flat(0.0),
            bottom: Plane::flat(0.0),
        }
    }

    pub fn sidedef(&self) -> SidedefId {
        self.sidedef
    }

    /// Ceiling plane of the owning sector, kept from the last successful
    /// rebuild for intersection queries by sibling builders.
    pub fn top_plane(&self) -> &Plane {
        &self.top
    }

    /// Lower bounding plane from the last successful rebuild: the
    /// neighbour's ceiling, unless the owning floor is higher.
    pub fn bottom_plane(&self) -> &Plane {
        &self.bottom
    }

    /// True when this part was built against a placeholder and waits for
    /// `name` to finish loading.
    pub fn needs_resetup_for(&self, name: &str) -> bool {
        self.setup_on_loaded.as_deref() == Some(name)
    }

    /// One-shot deferred rebuild: call when a texture load completes
    /// out-of-band. Returns the new `setup` result, or `false` when this
    /// part was not waiting for `name`.
    pub fn on_texture_loaded(&mut self, ctx: &mut EditContext<'_>, name: &str) -> bool {
        if !self.needs_resetup_for(name) {
            return false;
        }
        self.setup(ctx)
    }

    fn build(&mut self, ctx: &mut EditContext<'_>) -> Option<Vec<WorldVertex>> {
        let map: &Map = ctx.map;
        let sd = map.sidedef(self.sidedef).ok()?;
        let other_sid = map.other_side(self.sidedef)?;
        let osd = map.sidedef(other_sid).ok()?;
        let sec = map.sector(sd.sector).ok()?;
        let osec = map.sector(osd.sector).ok()?;
        let ld = map.linedef(sd.linedef).ok()?;
        let (vl, vr) = map.side_edge_points(self.sidedef).ok()?;

        let own = ctx.cache.get_or_update(map, sd.sector).clone();
        let other = ctx.cache.get_or_update(map, osd.sector).clone();

        // Visible only where our ceiling is strictly above the other
        // sector's; a slanted ceiling may clear it at one endpoint only.
        let vlzc = own.ceiling.get_z(vl);
        let vrzc = own.ceiling.get_z(vr);
        if !(vlzc > other.ceiling.get_z(vl) || vrzc > other.ceiling.get_z(vr)) {
            return None;
        }

        // Sky hack: the renderer draws this quad as sky instead of a
        // textured wall. Advisory only, geometry is unaffected.
        self.render_as_sky =
            osec.has_sky_ceiling() && (sec.has_sky_ceiling() || !sd.has_upper_texture());

        let (light_value, light_absolute) = get_light_value(sd);

        let part_scale = dvec2(
            sd.fields.get_f64(FIELD_SCALE_X, 1.0),
            sd.fields.get_f64(FIELD_SCALE_Y, 1.0),
        );
        let part_offset = dvec2(
            sd.fields.get_f64(FIELD_OFFSET_X, 0.0),
            sd.fields.get_f64(FIELD_OFFSET_Y, 0.0),
        );

        // Resolve the assigned texture. Unknown or still-loading names
        // leave a one-shot marker so the caller re-runs setup when the
        // image arrives; "no texture" gets the missing placeholder.
        let img = if sd.has_upper_texture() {
            match ctx.catalog.id(&sd.upper) {
                Some(id) => {
                    let image = ctx.catalog.image(id).ok()?;
                    if image.loaded {
                        self.setup_on_loaded = None;
                    } else {
                        debug!("upper texture `{}` still loading, deferring", sd.upper);
                        self.setup_on_loaded = Some(sd.upper.clone());
                    }
                    self.texture = id;
                    image
                }
                None => {
                    warn!("upper texture `{}` not in catalog, using placeholder", sd.upper);
                    self.setup_on_loaded = Some(sd.upper.clone());
                    self.texture = UNKNOWN_TEXTURE;
                    ctx.catalog.image(UNKNOWN_TEXTURE).ok()?
                }
            }
        } else {
            self.setup_on_loaded = None;
            self.texture = MISSING_TEXTURE;
            ctx.catalog.image(MISSING_TEXTURE).ok()?
        };

        let tp = TexturePlane::for_upper(
            vl,
            vr,
            sec.ceil_h,
            osec.ceil_h,
            map.line_length(sd.linedef).ok()?,
            !ld.flags.contains(LinedefFlags::UPPER_UNPEGGED),
            img,
            part_scale,
            dvec2(sd.offset_x as f64, sd.offset_y as f64) + part_offset,
            ctx.config.scaled_texture_offsets,
            ctx.mapinfo.force_world_panning,
        );

        // One light level for the whole segment, shaded by wall direction
        // and tinted by the light colour below our ceiling.
        let light_level = if light_absolute {
            light_value
        } else {
            own.brightness_below + light_value
        };
        let shaded = brightness_color(wall_brightness(light_level, vr - vl));
        let wall_color = PixelColor::modulate(own.color_below, shaded).with_alpha(255);
        self.fog = fog_factor(light_level, ctx.mapinfo);

        // Base quad between floor and ceiling at both endpoints.
        let mut poly = WallPolygon::new(wall_color.to_int());
        poly.add(dvec3(vl.x, vl.y, own.floor.get_z(vl)));
        poly.add(dvec3(vl.x, vl.y, vlzc));
        poly.add(dvec3(vr.x, vr.y, vrzc));
        poly.add(dvec3(vr.x, vr.y, own.floor.get_z(vr)));

        // Only the strip above the other ceiling belongs to the upper
        // part; then punch out the sector's 3-D floors.
        crop_against_plane(&mut poly, &other.ceiling, true);
        let mut polys = vec![poly];
        clip_extra_floors(&mut polys, &own.extra_floors, false);

        // Bounding planes for later intersection queries. The owning
        // floor can sit above the other sector's ceiling.
        let center = map.line_center(sd.linedef).ok()?;
        self.top = own.ceiling;
        self.bottom = if other.ceiling.get_z(center) > own.floor.get_z(center) {
            other.ceiling
        } else {
            own.floor
        };

        let verts = create_polygon_vertices(&polys, &tp, self.fog);
        (verts.len() > 2).then_some(verts)
    }

    fn world_panning_extents(&self, ctx: &EditContext<'_>, scale: DVec2) -> (f64, f64) {
        let Ok(img) = ctx.catalog.image(self.texture) else {
            return (-1.0, -1.0);
        };
        if !img.loaded {
            return (-1.0, -1.0);
        }
        if img.world_panning || ctx.mapinfo.force_world_panning {
            (img.scaled_width() / scale.x, img.scaled_height() / scale.y)
        } else {
            (img.width as f64, img.height as f64)
        }
    }
}

impl WallPart for UpperWall {
    /// Rebuild the part's geometry. Returns `false`, with an empty vertex
    /// list, when nothing is visible; that is the expected outcome for
    /// matching ceilings or a fully occluded strip.
    fn setup(&mut self, ctx: &mut EditContext<'_>) -> bool {
        match self.build(ctx) {
            Some(verts) => {
                self.vertices = verts;
                true
            }
            None => {
                self.vertices.clear();
                false
            }
        }
    }

    fn vertices(&self) -> &[WorldVertex] {
        &self.vertices
    }

    fn texture_name<'m>(&self, map: &'m Map) -> &'m str {
        map.sidedefs
            .get(self.sidedef as usize)
            .map(|sd| sd.upper.as_str())
            .unwrap_or(NO_TEXTURE_NAME)
    }

    fn set_texture(&mut self, ctx: &mut EditContext<'_>, name: &str) {
        let Ok(sd) = ctx.map.sidedef_mut(self.sidedef) else {
            return;
        };
        sd.upper = name.to_owned();
        self.setup(ctx);
    }

    fn set_texture_offset_x(&mut self, map: &mut Map, px: i32) {
        if let Ok(sd) = map.sidedef_mut(self.sidedef) {
            sd.fields.set_f64(FIELD_OFFSET_X, px as f64);
        }
    }

    fn set_texture_offset_y(&mut self, map: &mut Map, px: i32) {
        if let Ok(sd) = map.sidedef_mut(self.sidedef) {
            sd.fields.set_f64(FIELD_OFFSET_Y, px as f64);
        }
    }

    /// Shift the stored offsets by a pixel delta, wrapping into the
    /// texture extents. Under world panning the extent is the scaled size
    /// divided by the part scale, so repeated edits stay self-consistent
    /// with the projection arithmetic.
    fn move_texture_offset(&mut self, ctx: &mut EditContext<'_>, dx: i32, dy: i32) {
        let Ok(sd) = ctx.map.sidedef(self.sidedef) else {
            return;
        };
        let scale = dvec2(
            sd.fields.get_f64(FIELD_SCALE_X, 1.0),
            sd.fields.get_f64(FIELD_SCALE_Y, 1.0),
        );
        let old_x = sd.fields.get_f64(FIELD_OFFSET_X, 0.0);
        let old_y = sd.fields.get_f64(FIELD_OFFSET_Y, 0.0);
        let (width, height) = self.world_panning_extents(ctx, scale);

        let new_x = wrapped_offset(old_x, dx, width);
        let new_y = wrapped_offset(old_y, dy, height);
        if let Ok(sd) = ctx.map.sidedef_mut(self.sidedef) {
            sd.fields.set_f64(FIELD_OFFSET_X, new_x);
            sd.fields.set_f64(FIELD_OFFSET_Y, new_y);
        }
    }

    fn texture_offset(&self, map: &Map) -> (i32, i32) {
        map.sidedefs
            .get(self.sidedef as usize)
            .map(|sd| {
                (
                    sd.fields.get_f64(FIELD_OFFSET_X, 0.0) as i32,
                    sd.fields.get_f64(FIELD_OFFSET_Y, 0.0) as i32,
                )
            })
            .unwrap_or((0, 0))
    }

    /// Remove the per-part scale attributes, reverting to the 1.0
    /// default. The caller re-runs `setup` afterwards.
    fn reset_texture_scale(&mut self, map: &mut Map) {
        if let Ok(sd) = map.sidedef_mut(self.sidedef) {
            sd.fields.remove(FIELD_SCALE_X);
            sd.fields.remove(FIELD_SCALE_Y);
        }
    }

    /// Stretch the texture to exactly cover this part. UDMF maps only,
    /// and a no-op unless the part is actually required and carries a
    /// real, loaded texture.
    fn fit_texture(&mut self, ctx: &mut EditContext<'_>, options: FitTextureOptions) {
        if !ctx.map.is_udmf() || !ctx.map.high_required(self.sidedef) {
            return;
        }
        let Ok(sd) = ctx.map.sidedef(self.sidedef) else {
            return;
        };
        if !sd.has_upper_texture() {
            return;
        }
        let Some(id) = ctx.catalog.id(&sd.upper) else {
            return;
        };
        let Ok(img) = ctx.catalog.image(id) else {
            return;
        };
        if !img.loaded {
            return;
        }

        let Ok(edge_len) = ctx.map.line_length(sd.linedef) else {
            return;
        };
        let Some(other_sid) = ctx.map.other_side(self.sidedef) else {
            return;
        };
        let (Ok(sec), Ok(osd)) = (ctx.map.sector(sd.sector), ctx.map.sidedef(other_sid)) else {
            return;
        };
        let Ok(osec) = ctx.map.sector(osd.sector) else {
            return;
        };
        let part_height = sec.ceil_h - osec.ceil_h;

        let scale_x = img.scaled_width() / edge_len;
        let scale_y = img.scaled_height() / part_height;
        if let Ok(sd) = ctx.map.sidedef_mut(self.sidedef) {
            if options.fit_width {
                sd.fields.set_f64(FIELD_SCALE_X, scale_x);
                sd.fields.set_f64(FIELD_OFFSET_X, 0.0);
            }
            if options.fit_height {
                sd.fields.set_f64(FIELD_SCALE_Y, scale_y);
                sd.fields.set_f64(FIELD_OFFSET_Y, 0.0);
            }
        }
        self.setup(ctx);
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
