//! Tactile Application
//!
//! Headless application shell: loads a scene description, replays a pointer
//! script against it and renders every frame into a draw list.

mod app;

pub use app::{App, AppConfig, AppError, Frame, SceneFile};
