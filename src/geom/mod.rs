mod plane;
mod polygon;

pub use plane::Plane;
pub use polygon::{ExtraFloor, WallPolygon, clip_extra_floors, crop_against_plane};
