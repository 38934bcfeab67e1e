use glam::{DVec2, DVec3};

use crate::textures::TextureImage;

/// Affine map from points on a wall quad to texture coordinates.
///
/// Three UV corners paired with three world corners pin the mapping down;
/// the fourth pair is implied. Built once per wall part, then queried for
/// every emitted vertex, so fully occluded corners still project
/// consistently.
#[derive(Clone, Copy, Debug)]
pub struct TexturePlane {
    pub tlt: DVec2, // texture left-top
    pub trb: DVec2, // texture right-bottom
    pub trt: DVec2, // texture right-top
    pub vlt: DVec3, // world left-top
    pub vrb: DVec3, // world right-bottom
    pub vrt: DVec3, // world right-top
}

impl TexturePlane {
    /// Build the projection plane for an upper wall part.
    ///
    /// Reproduces the game engine's texture-alignment arithmetic exactly;
    /// every rounding step below is part of that compatibility contract
    /// and must not be "cleaned up":
    ///
    /// * effective texel size rounds **up** after dividing by the part
    ///   scale;
    /// * the horizontal extent snaps to the linedef length rounded
    ///   half-to-even;
    /// * requantized offsets round **up** again, and hires replacements
    ///   multiply the part scale back in beforehand.
    ///
    /// `peg_to_bottom` is the default for upper parts (texture bottom on
    /// the lower edge); the line's "upper unpegged" flag turns it off.
    /// When the two ceilings are at the same raw height the lower edge is
    /// biased down by one unit so the plane never degenerates.
    #[allow(clippy::too_many_arguments)]
    pub fn for_upper(
        vl: DVec2,
        vr: DVec2,
        own_ceil_h: f64,
        neighbor_ceil_h: f64,
        edge_length: f64,
        peg_to_bottom: bool,
        img: &TextureImage,
        part_scale: DVec2,
        pixel_offset: DVec2,
        scaled_texture_offsets: bool,
        force_world_panning: bool,
    ) -> Self {
        let scale_abs = part_scale.abs();

        // Effective texture size in pixels, rounded up.
        let tsz = DVec2::new(
            (img.scaled_width() / part_scale.x).ceil(),
            (img.scaled_height() / part_scale.y).ceil(),
        );

        // Offsets stay in texture pixels unless the texture world-pans (by
        // its own flag or the per-map override), in which case they are
        // requantized through the scales.
        let mut tof = pixel_offset;
        if scaled_texture_offsets && !img.world_panning && !force_world_panning {
            tof /= scale_abs;
            tof *= img.scale;
            if img.hires {
                tof *= scale_abs;
            }
            tof = DVec2::new(tof.x.ceil(), tof.y.ceil());
        }

        // One unit of bias keeps the plane non-degenerate when both
        // ceilings sit at the same raw height.
        let ceil_bias = if neighbor_ceil_h == own_ceil_h { 1.0 } else { 0.0 };

        let mut tlt = DVec2::ZERO;
        if peg_to_bottom {
            tlt.y = tsz.y - (own_ceil_h - neighbor_ceil_h);
        }
        let mut trb = DVec2::new(
            tlt.x + edge_length.round_ties_even(),
            tlt.y + (own_ceil_h - (neighbor_ceil_h + ceil_bias)),
        );

        tlt += tof;
        trb += tof;

        // Pixel space → normalized texture space.
        tlt /= tsz;
        trb /= tsz;

        let vlt = DVec3::new(vl.x, vl.y, own_ceil_h);
        let vrb = DVec3::new(vr.x, vr.y, neighbor_ceil_h + ceil_bias);
        TexturePlane {
            tlt,
            trb,
            trt: DVec2::new(trb.x, tlt.y),
            vlt,
            vrb,
            vrt: DVec3::new(vrb.x, vrb.y, vlt.z),
        }
    }

    /// Texture coordinates of a world position on the wall's plane.
    pub fn texture_coords_at(&self, pos: DVec3) -> DVec2 {
        let along = DVec2::new(self.vrt.x - self.vlt.x, self.vrt.y - self.vlt.y);
        let len_sq = along.length_squared();
        let u_t = if len_sq > 0.0 {
            DVec2::new(pos.x - self.vlt.x, pos.y - self.vlt.y).dot(along) / len_sq
        } else {
            0.0
        };
        // vrb.z never equals vlt.z thanks to the construction bias.
        let v_t = (pos.z - self.vlt.z) / (self.vrb.z - self.vlt.z);
        DVec2::new(
            self.tlt.x + u_t * (self.trt.x - self.tlt.x),
            self.tlt.y + v_t * (self.trb.y - self.tlt.y),
        )
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
