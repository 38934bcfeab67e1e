mod fields;
mod geometry;

pub use fields::FieldMap;
pub use geometry::{
    Linedef, LinedefFlags, LinedefId, Map, MapError, MapFormat, Sector, SectorFlags, SectorId,
    Sidedef, SidedefId, Vertex, VertexId, NO_TEXTURE_NAME,
};
