//! Image-file asset loading.

use std::path::{Path, PathBuf};
use tactile_core::texture::{AssetError, AssetLoader, AssetResult, TextureHandle};

/// Resolves asset paths to image files under a base directory.
///
/// Only the image header is read to learn the intrinsic size; pixel data is
/// left to the rendering backend.
#[derive(Debug, Clone)]
pub struct ImageAssetLoader {
    base_dir: PathBuf,
}

impl ImageAssetLoader {
    /// Create a loader rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl AssetLoader for ImageAssetLoader {
    fn load(&self, path: &str) -> AssetResult<TextureHandle> {
        let full_path = self.base_dir.join(path);
        let (width, height) = ::image::image_dimensions(&full_path).map_err(|e| match e {
            ::image::ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
                AssetError::NotFound(full_path.display().to_string())
            }
            other => AssetError::Decode(format!("{}: {}", full_path.display(), other)),
        })?;
        log::debug!("Resolved {} ({}x{})", full_path.display(), width, height);
        Ok(TextureHandle::new(path, width, height))
    }
}
