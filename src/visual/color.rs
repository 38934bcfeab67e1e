use glam::DVec2;

use crate::config::MapInfo;

/// Packed 0xAARRGGBB editor colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelColor {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelColor {
    pub fn from_int(c: u32) -> Self {
        PixelColor {
            a: (c >> 24) as u8,
            r: (c >> 16) as u8,
            g: (c >> 8) as u8,
            b: c as u8,
        }
    }

    pub fn to_int(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub fn with_alpha(self, a: u8) -> Self {
        PixelColor { a, ..self }
    }

    /// Component-wise multiply, `255` acting as identity.
    pub fn modulate(x: Self, y: Self) -> Self {
        let mul = |p: u8, q: u8| ((p as u32 * q as u32) / 255) as u8;
        PixelColor {
            a: mul(x.a, y.a),
            r: mul(x.r, y.r),
            g: mul(x.g, y.g),
            b: mul(x.b, y.b),
        }
    }
}

#[inline]
fn clamp_level(level: i32) -> i32 {
    level.clamp(0, 255)
}

/// Classic axis-dependent wall auto-shading: fully north-south edges get
/// one extra light step, fully east-west edges lose one (16 units, as the
/// game engine applies it).
pub fn wall_brightness(light_level: i32, edge_delta: DVec2) -> i32 {
    let mut level = clamp_level(light_level);
    if edge_delta.x == 0.0 {
        level += 16;
    } else if edge_delta.y == 0.0 {
        level -= 16;
    }
    clamp_level(level)
}

/// Grey ramp for a wall light level, opaque.
pub fn brightness_color(level: i32) -> PixelColor {
    let v = clamp_level(level) as u8;
    PixelColor {
        a: 255,
        r: v,
        g: v,
        b: v,
    }
}

/// Distance-fog blend weight for one wall segment. Darker sectors fog
/// harder; a fully lit wall does not fog at all.
pub fn fog_factor(light_level: i32, mapinfo: &MapInfo) -> f32 {
    (255 - clamp_level(light_level)) as f32 / 255.0 * mapinfo.fog_density
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn pack_round_trip() {
        let c = PixelColor::from_int(0x80FF4020);
        assert_eq!((c.a, c.r, c.g, c.b), (0x80, 0xFF, 0x40, 0x20));
        assert_eq!(c.to_int(), 0x80FF4020);
        assert_eq!(c.with_alpha(255).to_int(), 0xFFFF4020);
    }

    #[test]
    fn modulate_identity_and_black() {
        let white = PixelColor::from_int(0xFFFFFFFF);
        let c = PixelColor::from_int(0xFF804020);
        assert_eq!(PixelColor::modulate(c, white), c);
        let black = PixelColor::from_int(0xFF000000);
        let out = PixelColor::modulate(c, black);
        assert_eq!((out.r, out.g, out.b), (0, 0, 0));
    }

    #[test]
    fn axis_shading() {
        assert_eq!(wall_brightness(128, dvec2(0.0, 64.0)), 144); // N-S
        assert_eq!(wall_brightness(128, dvec2(64.0, 0.0)), 112); // E-W
        assert_eq!(wall_brightness(128, dvec2(32.0, 32.0)), 128); // diagonal
        assert_eq!(wall_brightness(250, dvec2(0.0, 64.0)), 255); // clamped
    }

    #[test]
    fn fog_scales_with_darkness() {
        let mi = MapInfo::default();
        assert_eq!(fog_factor(255, &mi), 0.0);
        assert_eq!(fog_factor(0, &mi), 1.0);
        let denser = MapInfo {
            fog_density: 2.0,
            ..MapInfo::default()
        };
        assert_eq!(fog_factor(127, &mi) * 2.0, fog_factor(127, &denser));
    }
}
