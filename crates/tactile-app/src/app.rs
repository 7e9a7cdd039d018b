//! Scene loading and event replay.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tactile_core::input::PointerEvent;
use tactile_core::message::Envelope;
use tactile_core::scene::{Scene, SceneError};
use tactile_core::texture::AssetLoader;
use tactile_core::widget::{ButtonDescriptor, Guard};
use tactile_render::{DrawCommand, DrawList, ImageAssetLoader, Renderer};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid scene file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scene assembly failed: {0}")]
    Scene(#[from] SceneError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Scene description to load.
    pub scene_path: PathBuf,
    /// Directory textures are resolved against. Defaults to the scene
    /// file's directory.
    pub asset_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Tactile".to_string(),
            scene_path: PathBuf::from("scene.json"),
            asset_dir: None,
        }
    }
}

impl AppConfig {
    /// Configuration for the scene at `path`.
    pub fn from_scene_path(path: impl Into<PathBuf>) -> Self {
        Self {
            scene_path: path.into(),
            ..Self::default()
        }
    }

    /// Directory textures are loaded from.
    pub fn resolved_asset_dir(&self) -> PathBuf {
        self.asset_dir.clone().unwrap_or_else(|| {
            self.scene_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        })
    }
}

/// On-disk scene description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    /// Controllers buttons may send messages to.
    #[serde(default)]
    pub controllers: Vec<String>,
    pub buttons: Vec<ButtonDescriptor>,
    /// Pointer script replayed by [`App::run`].
    #[serde(default)]
    pub events: Vec<PointerEvent>,
}

/// Everything that happened in one frame.
#[derive(Debug)]
pub struct Frame {
    /// Event dispatched this frame; `None` for the initial frame.
    pub event: Option<PointerEvent>,
    pub fired: Vec<(String, Guard)>,
    /// Number of rejected transitions.
    pub rejected: usize,
    pub draws: Vec<DrawCommand>,
    pub messages: Vec<Envelope>,
}

/// Headless application: one scene, one event script.
pub struct App {
    config: AppConfig,
    scene: Scene,
    events: Vec<PointerEvent>,
    renderer: DrawList,
}

impl App {
    /// Load the scene named by `config`, resolving textures from disk.
    pub fn load(config: AppConfig) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(&config.scene_path).map_err(|source| AppError::Io {
            path: config.scene_path.clone(),
            source,
        })?;
        let file: SceneFile = serde_json::from_str(&text)?;
        let loader = ImageAssetLoader::new(config.resolved_asset_dir());
        Self::from_scene_file(config, file, &loader)
    }

    /// Assemble an app from an already-parsed scene description.
    pub fn from_scene_file(
        config: AppConfig,
        file: SceneFile,
        loader: &dyn AssetLoader,
    ) -> Result<Self, AppError> {
        let mut scene = Scene::new();
        for controller in file.controllers {
            scene.register_controller(controller);
        }
        for descriptor in &file.buttons {
            scene.add_descriptor(descriptor, loader)?;
        }
        log::info!(
            "{}: loaded {} buttons, {} events",
            config.title,
            scene.len(),
            file.events.len()
        );
        Ok(Self {
            config,
            scene,
            events: file.events,
            renderer: DrawList::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replay the event script, rendering one frame before the first event
    /// and one after each event.
    pub fn run(&mut self) -> Vec<Frame> {
        let events = std::mem::take(&mut self.events);
        let mut frames = Vec::with_capacity(events.len() + 1);
        frames.push(self.frame(None));
        for event in events {
            frames.push(self.frame(Some(event)));
        }
        frames
    }

    fn frame(&mut self, event: Option<PointerEvent>) -> Frame {
        self.scene.begin_frame();
        let (fired, rejected) = match &event {
            Some(event) => {
                let report = self.scene.dispatch(event);
                (report.fired, report.rejected.len())
            }
            None => (Vec::new(), 0),
        };
        for (name, guard) in &fired {
            log::info!("{} -> {:?}", name, guard);
        }

        self.renderer.render_scene(&self.scene);
        let draws = self.renderer.take();
        for draw in &draws {
            log::debug!("draw {} at {:?}", draw.path, draw.dest);
        }

        let messages = self.scene.drain_messages();
        for envelope in &messages {
            log::info!(
                "message {} -> {}/{}: {}",
                envelope.message.src_object,
                envelope.dst_controller,
                envelope.message.dst_object,
                envelope.message.payload
            );
        }

        Frame {
            event,
            fired,
            rejected,
            draws,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_core::texture::MemoryAssetLoader;
    use tactile_core::widget::ButtonState;
    use tempfile::tempdir;

    const SCENE: &str = r#"{
        "controllers": ["menu"],
        "buttons": [
            {
                "name": "start",
                "x": 10.0,
                "y": 10.0,
                "normal": "start.png",
                "hovered": "start_hover.png",
                "pressed": "start_down.png",
                "on_release": {"controller": "menu", "object": "router", "payload": "play"}
            }
        ],
        "events": [
            {"Move": {"position": {"x": 20.0, "y": 20.0}}},
            {"Down": {"position": {"x": 20.0, "y": 20.0}, "button": "Left"}},
            {"Up": {"position": {"x": 20.0, "y": 20.0}, "button": "Left"}},
            {"Move": {"position": {"x": 500.0, "y": 500.0}}}
        ]
    }"#;

    #[test]
    fn test_replay_from_memory_assets() {
        let file: SceneFile = serde_json::from_str(SCENE).unwrap();
        let loader = MemoryAssetLoader::new()
            .with_asset("start.png", 80, 30)
            .with_asset("start_hover.png", 80, 30)
            .with_asset("start_down.png", 76, 26);
        let mut app = App::from_scene_file(AppConfig::default(), file, &loader).unwrap();

        let frames = app.run();
        assert_eq!(frames.len(), 5);

        assert!(frames[0].event.is_none());
        assert_eq!(frames[0].draws[0].path, "start.png");

        let guards: Vec<_> = frames[1..]
            .iter()
            .map(|frame| frame.fired.first().map(|(_, guard)| *guard))
            .collect();
        assert_eq!(
            guards,
            vec![
                Some(Guard::HoverIn),
                Some(Guard::Press),
                Some(Guard::Release),
                Some(Guard::HoverOut),
            ]
        );
        assert_eq!(frames[2].draws[0].path, "start_down.png");
        assert_eq!(frames[3].messages.len(), 1);
        assert_eq!(frames[3].messages[0].message.payload, serde_json::json!("play"));
        assert_eq!(app.scene().button("start").unwrap().state(), ButtonState::Normal);

        // The script is consumed
        assert_eq!(app.run().len(), 1);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        for (name, w, h) in [
            ("start.png", 80, 30),
            ("start_hover.png", 80, 30),
            ("start_down.png", 76, 26),
        ] {
            ::image::RgbaImage::new(w, h).save(dir.path().join(name)).unwrap();
        }
        let scene_path = dir.path().join("scene.json");
        std::fs::write(&scene_path, SCENE).unwrap();

        let mut app = App::load(AppConfig::from_scene_path(&scene_path)).unwrap();
        assert_eq!(app.config().resolved_asset_dir(), dir.path());

        let frames = app.run();
        assert_eq!(frames[2].draws[0].dest.width(), 76.0);
    }

    #[test]
    fn test_missing_texture_fails_load() {
        let file: SceneFile = serde_json::from_str(SCENE).unwrap();
        let loader = MemoryAssetLoader::new().with_asset("start.png", 80, 30);

        let err = App::from_scene_file(AppConfig::default(), file, &loader).err().unwrap();
        assert!(matches!(err, AppError::Scene(_)));
    }

    #[test]
    fn test_missing_scene_file() {
        let dir = tempdir().unwrap();
        let config = AppConfig::from_scene_path(dir.path().join("absent.json"));

        let err = App::load(config).err().unwrap();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_invalid_scene_json() {
        let dir = tempdir().unwrap();
        let scene_path = dir.path().join("scene.json");
        std::fs::write(&scene_path, "{\"buttons\": 3}").unwrap();

        let err = App::load(AppConfig::from_scene_path(&scene_path)).err().unwrap();
        assert!(matches!(err, AppError::Json(_)));
    }
}
