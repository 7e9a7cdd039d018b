//! Tactile Render Library
//!
//! Renderer abstraction and asset loading for Tactile widgets.
//! The bundled backend records draw calls for headless runs.

mod assets;
mod renderer;

pub use assets::ImageAssetLoader;
pub use renderer::{DrawCommand, DrawList, Renderer};
