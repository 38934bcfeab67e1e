//! Visual-mode wall geometry core for a Doom-style map editor.
//!
//! The crate builds the renderable quads for vertical wall parts: given an
//! editable map model and a texture catalog it computes visibility, clips
//! the wall against the neighbouring sector and any 3-D floors, projects
//! texture coordinates under the engine's pegging/panning rules and emits
//! flat-shaded [`visual::WorldVertex`] lists for an external renderer.

pub mod config;
pub mod geom;
pub mod map;
pub mod textures;
pub mod visual;
