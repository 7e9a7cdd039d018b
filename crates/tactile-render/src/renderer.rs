//! Renderer trait abstraction.

use kurbo::Rect;
use tactile_core::scene::Scene;
use tactile_core::texture::{TextureHandle, TextureId};
use tactile_core::widget::{Button, ButtonCallback};

/// Trait for rendering backends.
///
/// Backends only need the single draw primitive; widget and scene rendering
/// are built on top of it. Drawing never changes widget state.
pub trait Renderer {
    /// Draw `texture` stretched into `dest`.
    fn draw_texture(&mut self, texture: &TextureHandle, dest: Rect);

    /// Draw the texture bound to the button's current state at its bounds.
    fn render_button<C: ButtonCallback>(&mut self, button: &Button<C>)
    where
        Self: Sized,
    {
        match button.active_texture() {
            Some(texture) => self.draw_texture(texture.handle(), button.bounds()),
            None => log::warn!("Button '{}' has no active texture", button.name()),
        }
    }

    /// Draw every button of the scene in insertion order.
    fn render_scene(&mut self, scene: &Scene)
    where
        Self: Sized,
    {
        for button in scene.buttons() {
            self.render_button(button);
        }
    }
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureId,
    /// Path the texture was loaded from.
    pub path: String,
    pub dest: Rect,
}

/// Renderer that records draw calls instead of issuing them.
///
/// Used for headless runs; a frame's commands can be inspected or logged
/// and then cleared before the next frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Renderer for DrawList {
    fn draw_texture(&mut self, texture: &TextureHandle, dest: Rect) {
        self.commands.push(DrawCommand {
            texture: texture.id(),
            path: texture.path().to_string(),
            dest,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use tactile_core::input::{MouseButton, PointerEvent};
    use tactile_core::texture::MemoryAssetLoader;
    use tactile_core::widget::{ButtonDescriptor, NoopCallback};

    fn loader() -> MemoryAssetLoader {
        MemoryAssetLoader::new()
            .with_asset("go.png", 64, 32)
            .with_asset("go_hover.png", 64, 32)
            .with_asset("go_down.png", 60, 28)
    }

    fn descriptor(name: &str, x: f64) -> ButtonDescriptor {
        ButtonDescriptor {
            name: name.to_string(),
            x,
            y: 8.0,
            normal: "go.png".to_string(),
            hovered: Some("go_hover.png".to_string()),
            pressed: Some("go_down.png".to_string()),
            on_release: None,
        }
    }

    #[test]
    fn test_render_before_any_event_uses_initial_texture() {
        let button = Button::from_descriptor(&descriptor("go", 4.0), &loader(), NoopCallback).unwrap();
        let mut list = DrawList::new();

        list.render_button(&button);

        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.commands()[0].path, "go.png");
        assert_eq!(list.commands()[0].dest, Rect::new(4.0, 8.0, 68.0, 40.0));
    }

    #[test]
    fn test_render_follows_active_state() {
        let mut scene = Scene::new();
        scene.add_descriptor(&descriptor("go", 0.0), &loader()).unwrap();
        let position = Point::new(10.0, 20.0);
        scene.dispatch(&PointerEvent::Move { position });
        scene.dispatch(&PointerEvent::Down {
            position,
            button: MouseButton::Left,
        });

        let mut list = DrawList::new();
        list.render_scene(&scene);

        let commands = list.take();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].path, "go_down.png");
        assert_eq!(commands[0].dest, Rect::new(0.0, 8.0, 60.0, 36.0));
        assert!(list.commands().is_empty());
    }

    #[test]
    fn test_render_does_not_change_state() {
        let mut scene = Scene::new();
        scene.add_descriptor(&descriptor("a", 0.0), &loader()).unwrap();
        scene.add_descriptor(&descriptor("b", 100.0), &loader()).unwrap();

        let mut list = DrawList::new();
        list.render_scene(&scene);
        list.render_scene(&scene);

        let paths: Vec<_> = list.commands().iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["go.png", "go.png", "go.png", "go.png"]);
        assert!(scene.buttons().all(|b| b.state() == tactile_core::ButtonState::Normal));

        list.clear();
        assert!(list.commands().is_empty());
    }
}
