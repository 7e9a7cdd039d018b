//! Drawable textures and the asset resolution seam.

use kurbo::{Point, Rect, Size};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a loaded texture.
pub type TextureId = Uuid;

/// Asset resolution errors.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),
    #[error("Failed to decode asset: {0}")]
    Decode(String),
}

/// Result type for asset resolution.
pub type AssetResult<T> = Result<T, AssetError>;

/// An opaque drawable handle with known intrinsic size.
///
/// The handle carries no pixel data. Rendering backends look the texture up
/// by id or path.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureHandle {
    id: TextureId,
    path: String,
    width: u32,
    height: u32,
}

impl TextureHandle {
    /// Create a handle for a resolved asset.
    pub fn new(path: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            width,
            height,
        }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Path the handle was resolved from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic size in pixels.
    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }
}

/// Resolves a path to a drawable handle.
pub trait AssetLoader {
    /// Load the asset at `path`.
    fn load(&self, path: &str) -> AssetResult<TextureHandle>;
}

/// A texture placed in the scene: a handle plus its render rectangle.
///
/// The rectangle starts at the placement point and takes its size from the
/// handle's intrinsic size.
#[derive(Debug)]
pub struct Texture {
    name: String,
    handle: TextureHandle,
    render_rect: Rect,
}

impl Texture {
    /// Place an already-resolved handle at `position`.
    pub fn new(name: impl Into<String>, handle: TextureHandle, position: Point) -> Self {
        let render_rect = Rect::from_origin_size(position, handle.size());
        Self {
            name: name.into(),
            handle,
            render_rect,
        }
    }

    /// Resolve `path` through `loader` and place the result at `position`.
    pub fn load(
        loader: &dyn AssetLoader,
        path: &str,
        name: impl Into<String>,
        position: Point,
    ) -> AssetResult<Self> {
        let handle = loader.load(path)?;
        let texture = Self::new(name, handle, position);
        log::debug!(
            "Loaded texture '{}' from {} ({}x{})",
            texture.name,
            path,
            texture.handle.width(),
            texture.handle.height()
        );
        Ok(texture)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &TextureHandle {
        &self.handle
    }

    /// Rectangle the texture is drawn into.
    pub fn render_rect(&self) -> Rect {
        self.render_rect
    }
}

/// Asset loader backed by a fixed table of known sizes.
///
/// Useful for headless runs and tests where no files exist on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    assets: HashMap<String, (u32, u32)>,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset with the given intrinsic size.
    pub fn with_asset(mut self, path: impl Into<String>, width: u32, height: u32) -> Self {
        self.insert(path, width, height);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, width: u32, height: u32) {
        self.assets.insert(path.into(), (width, height));
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load(&self, path: &str) -> AssetResult<TextureHandle> {
        self.assets
            .get(path)
            .map(|&(width, height)| TextureHandle::new(path, width, height))
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rect_from_intrinsic_size() {
        let handle = TextureHandle::new("ok.png", 120, 40);
        let texture = Texture::new("ok_normal", handle, Point::new(10.0, 20.0));

        let rect = texture.render_rect();
        assert!((rect.x0 - 10.0).abs() < f64::EPSILON);
        assert!((rect.y0 - 20.0).abs() < f64::EPSILON);
        assert!((rect.width() - 120.0).abs() < f64::EPSILON);
        assert!((rect.height() - 40.0).abs() < f64::EPSILON);
        assert_eq!(texture.name(), "ok_normal");
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryAssetLoader::new().with_asset("a.png", 8, 6);

        let handle = loader.load("a.png").unwrap();
        assert_eq!(handle.path(), "a.png");
        assert_eq!((handle.width(), handle.height()), (8, 6));

        assert!(matches!(loader.load("missing.png"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_handles_get_distinct_ids() {
        let loader = MemoryAssetLoader::new().with_asset("a.png", 8, 6);
        let first = loader.load("a.png").unwrap();
        let second = loader.load("a.png").unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_texture_load_propagates_error() {
        let loader = MemoryAssetLoader::new();
        let err = Texture::load(&loader, "nope.png", "nope", Point::ZERO).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(path) if path == "nope.png"));
    }
}
