mod color;
mod sector;
mod texplane;
mod upper;
mod wall;

pub use color::{PixelColor, brightness_color, fog_factor, wall_brightness};
pub use sector::{SectorData, SectorDataCache};
pub use texplane::TexturePlane;
pub use upper::UpperWall;
pub use wall::{EditContext, FitTextureOptions, WallPart, WorldVertex};
