//! Settings records handed in by the out-of-scope collaborators: the game
//! configuration and the MAPINFO parser. Both arrive already validated;
//! this core only reads them.

/// Game-configuration toggles that alter texture-offset arithmetic.
#[derive(Clone, Copy, Debug)]
pub struct MapConfig {
    /// When set, stored offsets are interpreted in texture pixels and must
    /// be requantized through the texture's scale (legacy GZDoom rule).
    pub scaled_texture_offsets: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            scaled_texture_offsets: true,
        }
    }
}

/// Per-map settings distilled from the MAPINFO lump.
#[derive(Clone, Debug)]
pub struct MapInfo {
    /// Treat every texture as world-panning regardless of its own flag.
    pub force_world_panning: bool,
    /// Scales the fog factor derived from a wall's light level.
    pub fog_density: f32,
    /// Sky texture the renderer substitutes for sky-hacked quads.
    pub sky_texture: String,
}

impl Default for MapInfo {
    fn default() -> Self {
        MapInfo {
            force_world_panning: false,
            fog_density: 1.0,
            sky_texture: "SKY1".to_owned(),
        }
    }
}
