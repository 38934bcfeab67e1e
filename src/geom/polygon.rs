use glam::{DVec2, DVec3};
use smallvec::SmallVec;

use super::Plane;

/// One interior horizontal slab of a sector ("3-D floor").
///
/// Well-formed maps give `top.get_z(p) >= bottom.get_z(p)` everywhere and
/// slabs of one sector do not overlap each other.
#[derive(Clone, Copy, Debug)]
pub struct ExtraFloor {
    pub top: Plane,
    pub bottom: Plane,
}

/// A closed, convex vertex loop for one wall fragment.
///
/// Vertices run counter-clockwise as seen from the visible side; every
/// clip below preserves that winding. The packed colour is shared by the
/// whole fragment (walls are flat-shaded per segment).
#[derive(Clone, Debug, Default)]
pub struct WallPolygon {
    pub points: SmallVec<[DVec3; 8]>,
    pub color: u32,
}

impl WallPolygon {
    pub fn new(color: u32) -> Self {
        WallPolygon {
            points: SmallVec::new(),
            color,
        }
    }

    pub fn add(&mut self, p: DVec3) {
        self.points.push(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Signed height of `v` above the plane's height field.
#[inline]
fn height_above(plane: &Plane, v: DVec3) -> f64 {
    v.z - plane.get_z(DVec2::new(v.x, v.y))
}

/// Sutherland–Hodgman clip of `poly` against one height-field half-space.
///
/// `keep_above = true` keeps the part at or above the plane, `false` the
/// part at or below it. Vertices on the discarded side are replaced by the
/// interpolated boundary intersections. A result with fewer than three
/// vertices is emptied; a fully occluded fragment is a normal outcome, not
/// an error.
pub fn crop_against_plane(poly: &mut WallPolygon, plane: &Plane, keep_above: bool) {
    if poly.points.len() < 3 {
        poly.points.clear();
        return;
    }

    let inside = |h: f64| if keep_above { h >= 0.0 } else { h <= 0.0 };

    let mut out: SmallVec<[DVec3; 8]> = SmallVec::new();
    let n = poly.points.len();
    for i in 0..n {
        let cur = poly.points[i];
        let next = poly.points[(i + 1) % n];
        let h_cur = height_above(plane, cur);
        let h_next = height_above(plane, next);

        if inside(h_cur) {
            out.push(cur);
        }
        // Edge crosses the plane: emit the intersection point. The height
        // above the plane varies linearly along a straight edge, so the
        // parameter comes straight from the two signed heights.
        if (h_cur > 0.0 && h_next < 0.0) || (h_cur < 0.0 && h_next > 0.0) {
            let t = h_cur / (h_cur - h_next);
            out.push(cur + (next - cur) * t);
        }
    }

    if out.len() < 3 {
        out.clear();
    }
    poly.points = out;
}

/// Clip a working set of wall fragments against a sector's 3-D floors.
///
/// With `keep_covered = false` the slab interiors are removed from the set
/// (a fragment crossing a slab splits in two); with `true` only the parts
/// inside a slab survive, which is what the slab's own side faces use.
/// Degenerate fragments are dropped silently. The aggregate covered area
/// does not depend on slab order, only fragment boundaries may.
pub fn clip_extra_floors(
    polys: &mut Vec<WallPolygon>,
    floors: &[ExtraFloor],
    keep_covered: bool,
) {
    if floors.is_empty() {
        return;
    }

    if keep_covered {
        // Union over slabs; slabs of one sector do not overlap.
        let mut out = Vec::new();
        for ef in floors {
            for poly in polys.iter() {
                let mut inner = poly.clone();
                crop_against_plane(&mut inner, &ef.top, false);
                crop_against_plane(&mut inner, &ef.bottom, true);
                if !inner.is_empty() {
                    out.push(inner);
                }
            }
        }
        *polys = out;
        return;
    }

    for ef in floors {
        let mut out = Vec::with_capacity(polys.len() + 1);
        for poly in polys.drain(..) {
            let mut above = poly.clone();
            crop_against_plane(&mut above, &ef.top, true);
            let mut below = poly;
            crop_against_plane(&mut below, &ef.bottom, false);
            if !above.is_empty() {
                out.push(above);
            }
            if !below.is_empty() {
                out.push(below);
            }
        }
        *polys = out;
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    fn unit_quad(z_bot: f64, z_top: f64) -> WallPolygon {
        let mut p = WallPolygon::new(0xFF_FFFFFF);
        p.add(dvec3(0.0, 0.0, z_bot));
        p.add(dvec3(0.0, 0.0, z_top));
        p.add(dvec3(64.0, 0.0, z_top));
        p.add(dvec3(64.0, 0.0, z_bot));
        p
    }

    #[test]
    fn crop_keeps_untouched_polygon() {
        let mut q = unit_quad(0.0, 128.0);
        crop_against_plane(&mut q, &Plane::flat(-16.0), true);
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn crop_splits_at_plane_height() {
        let mut q = unit_quad(0.0, 128.0);
        crop_against_plane(&mut q, &Plane::flat(64.0), true);
        assert_eq!(q.len(), 4);
        for v in &q.points {
            assert!(v.z >= 64.0 - 1e-12);
        }
        assert!(q.points.iter().any(|v| (v.z - 64.0).abs() < 1e-12));
        assert!(q.points.iter().any(|v| (v.z - 128.0).abs() < 1e-12));
    }

    #[test]
    fn crop_drops_fully_clipped_polygon() {
        let mut q = unit_quad(0.0, 128.0);
        crop_against_plane(&mut q, &Plane::flat(256.0), true);
        assert!(q.is_empty());
    }

    #[test]
    fn crop_preserves_winding() {
        let mut q = unit_quad(0.0, 128.0);
        crop_against_plane(&mut q, &Plane::flat(32.0), true);
        // First surviving run still walks left-bottom → left-top → right.
        assert_eq!(q.points[0].x, 0.0);
        assert!(q.points.iter().rev().any(|v| v.x == 64.0));
    }

    #[test]
    fn extra_floor_outside_quad_is_noop() {
        let mut polys = vec![unit_quad(0.0, 64.0)];
        let floors = [ExtraFloor {
            top: Plane::flat(256.0),
            bottom: Plane::flat(192.0),
        }];
        clip_extra_floors(&mut polys, &floors, false);
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].len(), 4);
    }

    #[test]
    fn extra_floor_covering_quad_drops_it() {
        let mut polys = vec![unit_quad(32.0, 64.0)];
        let floors = [ExtraFloor {
            top: Plane::flat(128.0),
            bottom: Plane::flat(0.0),
        }];
        clip_extra_floors(&mut polys, &floors, false);
        assert!(polys.is_empty());
    }

    #[test]
    fn extra_floor_through_quad_splits_it() {
        let mut polys = vec![unit_quad(0.0, 128.0)];
        let floors = [ExtraFloor {
            top: Plane::flat(96.0),
            bottom: Plane::flat(32.0),
        }];
        clip_extra_floors(&mut polys, &floors, false);
        assert_eq!(polys.len(), 2);
        let above = polys.iter().find(|p| p.points[0].z >= 96.0 - 1e-9);
        let below = polys.iter().find(|p| p.points.iter().all(|v| v.z <= 32.0 + 1e-9));
        assert!(above.is_some());
        assert!(below.is_some());
    }

    #[test]
    fn keep_covered_returns_slab_interior() {
        let mut polys = vec![unit_quad(0.0, 128.0)];
        let floors = [ExtraFloor {
            top: Plane::flat(96.0),
            bottom: Plane::flat(32.0),
        }];
        clip_extra_floors(&mut polys, &floors, true);
        assert_eq!(polys.len(), 1);
        for v in &polys[0].points {
            assert!(v.z >= 32.0 - 1e-9 && v.z <= 96.0 + 1e-9);
        }
    }
}
