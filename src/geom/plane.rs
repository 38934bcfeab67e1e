use glam::{DVec2, DVec3};

/// A sector height field: the plane `a·x + b·y + c·z + d = 0` solved for z.
///
/// Floors and ceilings are stored in this form so that sloped and flat
/// sectors go through the same code path. `c` is never zero for a plane
/// produced by this module; a vertical plane cannot be a height field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane {
    /// Horizontal plane at `z = height`.
    pub fn flat(height: f64) -> Self {
        Plane {
            a: 0.0,
            b: 0.0,
            c: 1.0,
            d: -height,
        }
    }

    /// Plane through three points, for sloped floors/ceilings.
    ///
    /// A degenerate triple (collinear points, or a plane standing on edge)
    /// falls back to the flat plane through `p0.z` so that a malformed
    /// slope never produces NaN heights downstream.
    pub fn from_points(p0: DVec3, p1: DVec3, p2: DVec3) -> Self {
        let n = (p1 - p0).cross(p2 - p0);
        if n.z.abs() < 1e-9 {
            return Plane::flat(p0.z);
        }
        Plane {
            a: n.x,
            b: n.y,
            c: n.z,
            d: -n.dot(p0),
        }
    }

    /// Height of the plane above map point `p`.
    #[inline]
    pub fn get_z(&self, p: DVec2) -> f64 {
        -(self.a * p.x + self.b * p.y + self.d) / self.c
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn flat_plane_is_constant() {
        let p = Plane::flat(128.0);
        assert_eq!(p.get_z(DVec2::ZERO), 128.0);
        assert_eq!(p.get_z(DVec2::new(-512.0, 731.5)), 128.0);
    }

    #[test]
    fn slope_through_points() {
        // Rises 1 unit of z per unit of x.
        let p = Plane::from_points(
            dvec3(0.0, 0.0, 0.0),
            dvec3(0.0, 1.0, 0.0),
            dvec3(1.0, 0.0, 1.0),
        );
        assert!((p.get_z(DVec2::new(0.0, 5.0)) - 0.0).abs() < 1e-12);
        assert!((p.get_z(DVec2::new(4.0, -3.0)) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_points_fall_back_to_flat() {
        let p = Plane::from_points(
            dvec3(0.0, 0.0, 64.0),
            dvec3(1.0, 0.0, 64.0),
            dvec3(2.0, 0.0, 80.0), // collinear in xy
        );
        assert_eq!(p.get_z(DVec2::new(9.0, 9.0)), 64.0);
    }
}
