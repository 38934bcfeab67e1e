// Editor-side repository of texture metadata. The wall builders never see
// pixels; they query sizes, scales and panning flags through `TextureId`.

use std::collections::HashMap;

use glam::DVec2;
use once_cell::sync::Lazy;

/// Runtime handle for a texture in this catalog.
///
/// *Guaranteed* to remain stable for the lifetime of the catalog.
pub type TextureId = u16;

/// Placeholder shown where no texture is assigned at all.
/// Always = 0 because `TextureCatalog::new()` inserts it first.
pub const MISSING_TEXTURE: TextureId = 0;

/// Placeholder shown while a name resolves to nothing (unknown, or the
/// image has not finished loading). Always = 1.
pub const UNKNOWN_TEXTURE: TextureId = 1;

/// Image metadata as the editor's data manager exposes it.
///
/// `scale` comes from the game's texture definitions: a 128 px hires
/// replacement of a 64 px original carries scale 0.5 so its scaled size
/// stays 64. `loaded` flips when the asynchronous image load completes.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub scale: DVec2,
    pub world_panning: bool,
    pub hires: bool,
    pub loaded: bool,
}

impl TextureImage {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        TextureImage {
            name: name.to_owned(),
            width,
            height,
            scale: DVec2::ONE,
            world_panning: false,
            hires: false,
            loaded: true,
        }
    }

    /// Size in map units after applying the definition scale.
    pub fn scaled_width(&self) -> f64 {
        self.width as f64 * self.scale.x
    }

    pub fn scaled_height(&self) -> f64 {
        self.height as f64 * self.scale.y
    }
}

static MISSING_IMAGE: Lazy<TextureImage> = Lazy::new(|| TextureImage::new("MISSING3D", 64, 64));
static UNKNOWN_IMAGE: Lazy<TextureImage> = Lazy::new(|| TextureImage::new("UNKNOWN3D", 64, 64));

/// Things that can go wrong when using the catalog.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in catalog")]
    Duplicate(String),

    /// Requested ID is outside `0 .. catalog.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

/// Name → metadata catalog with stable ids and built-in placeholders.
///
/// * Does **not** know about WADs, PNG or OpenGL; that is the loader's job.
/// * Stores exactly one entry per name.
/// * IDs **0** and **1** are always the two placeholders.
///
/// **Thread-safety:** access from the single editing thread; the struct
/// itself is not `Sync`.
pub struct TextureCatalog {
    by_name: HashMap<String, TextureId>,
    data: Vec<TextureImage>,
}

impl TextureCatalog {
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert(MISSING_IMAGE.name.clone(), MISSING_TEXTURE);
        by_name.insert(UNKNOWN_IMAGE.name.clone(), UNKNOWN_TEXTURE);
        Self {
            by_name,
            data: vec![MISSING_IMAGE.clone(), UNKNOWN_IMAGE.clone()],
        }
    }

    /// Number of textures stored (including the placeholders).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 2 // only the placeholders
    }

    /// Obtain the id for a known texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to [`UNKNOWN_TEXTURE`].
    pub fn resolve(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or(UNKNOWN_TEXTURE)
    }

    /// Borrow metadata by id, with bounds-checking.
    pub fn image(&self, id: TextureId) -> Result<&TextureImage, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Insert a texture under its own name.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert(&mut self, image: TextureImage) -> Result<TextureId, TextureError> {
        if self.by_name.contains_key(&image.name) {
            return Err(TextureError::Duplicate(image.name));
        }
        let id = self.data.len() as TextureId;
        self.by_name.insert(image.name.clone(), id);
        self.data.push(image);
        Ok(id)
    }

    /// Flip the `loaded` flag once the out-of-band image load finishes.
    pub fn mark_loaded(&mut self, id: TextureId) -> Result<(), TextureError> {
        self.data
            .get_mut(id as usize)
            .map(|img| img.loaded = true)
            .ok_or(TextureError::BadId(id))
    }
}

impl Default for TextureCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
