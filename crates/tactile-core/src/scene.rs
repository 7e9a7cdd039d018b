//! Scene: a named set of buttons driven by one event stream.

use thiserror::Error;

use crate::input::{InputState, PointerEvent};
use crate::message::{Envelope, Outbox};
use crate::state::StateError;
use crate::texture::AssetLoader;
use crate::widget::{
    Button, ButtonCallback, ButtonDescriptor, DynButton, Guard, MessageOnRelease, NoopCallback,
};

/// Scene assembly errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Duplicate object name: {0}")]
    DuplicateObject(String),
    #[error(transparent)]
    State(#[from] StateError),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Outcome of dispatching one event to every button.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Buttons whose guard fired and whose transition succeeded.
    pub fired: Vec<(String, Guard)>,
    /// Buttons whose guard fired but whose transition was rejected.
    pub rejected: Vec<(String, StateError)>,
}

/// Owns buttons, tracks pointer input and queues outbound messages.
///
/// Buttons are dispatched and rendered in insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    buttons: Vec<DynButton>,
    input: InputState,
    outbox: Outbox,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow buttons to send messages to `name`.
    pub fn register_controller(&mut self, name: impl Into<String>) {
        self.outbox.register_controller(name);
    }

    /// Add a button. Names must be unique within the scene.
    pub fn add_button<C: ButtonCallback + 'static>(&mut self, button: Button<C>) -> SceneResult<()> {
        if self.button(button.name()).is_some() {
            return Err(SceneError::DuplicateObject(button.name().to_string()));
        }
        log::info!("Added button '{}' at {:?}", button.name(), button.bounds());
        self.buttons.push(button.boxed());
        Ok(())
    }

    /// Build a basic button from `descriptor` and add it.
    ///
    /// Buttons with a release action send a message on click; the rest only
    /// change appearance.
    pub fn add_descriptor(
        &mut self,
        descriptor: &ButtonDescriptor,
        loader: &dyn AssetLoader,
    ) -> SceneResult<()> {
        if self.button(&descriptor.name).is_some() {
            return Err(SceneError::DuplicateObject(descriptor.name.clone()));
        }
        match &descriptor.on_release {
            Some(action) => self.add_button(Button::from_descriptor(
                descriptor,
                loader,
                MessageOnRelease::new(action.clone()),
            )?),
            None => self.add_button(Button::from_descriptor(descriptor, loader, NoopCallback)?),
        }
    }

    pub fn button(&self, name: &str) -> Option<&DynButton> {
        self.buttons.iter().find(|button| button.name() == name)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &DynButton> {
        self.buttons.iter()
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Reset per-frame input state.
    pub fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    /// Deliver `event` to every button.
    ///
    /// A rejected transition is logged and reported; it never stops the
    /// remaining buttons from seeing the event.
    pub fn dispatch(&mut self, event: &PointerEvent) -> DispatchReport {
        self.input.handle_pointer_event(event);

        let mut report = DispatchReport::default();
        for button in &mut self.buttons {
            match button.handle_event(event, &mut self.outbox) {
                Ok(Some(guard)) => report.fired.push((button.name().to_string(), guard)),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Button '{}' rejected transition: {}", button.name(), e);
                    report.rejected.push((button.name().to_string(), e));
                }
            }
        }
        report
    }

    /// Number of messages waiting to be delivered.
    pub fn pending_messages(&self) -> usize {
        self.outbox.len()
    }

    /// Take all queued outbound messages.
    pub fn drain_messages(&mut self) -> Vec<Envelope> {
        self.outbox.drain().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use crate::texture::MemoryAssetLoader;
    use crate::widget::{ButtonState, ReleaseAction};
    use kurbo::Point;
    use serde_json::json;

    fn loader() -> MemoryAssetLoader {
        MemoryAssetLoader::new()
            .with_asset("a.png", 50, 20)
            .with_asset("a_hover.png", 50, 20)
            .with_asset("a_down.png", 48, 18)
    }

    fn descriptor(name: &str, x: f64) -> ButtonDescriptor {
        ButtonDescriptor {
            name: name.to_string(),
            x,
            y: 0.0,
            normal: "a.png".to_string(),
            hovered: Some("a_hover.png".to_string()),
            pressed: Some("a_down.png".to_string()),
            on_release: None,
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut scene = Scene::new();
        scene.add_descriptor(&descriptor("play", 0.0), &loader()).unwrap();

        let err = scene.add_descriptor(&descriptor("play", 100.0), &loader()).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateObject(name) if name == "play"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_load_failure_propagates() {
        let mut scene = Scene::new();
        let mut bad = descriptor("play", 0.0);
        bad.normal = "missing.png".to_string();

        let err = scene.add_descriptor(&bad, &loader()).unwrap_err();
        assert!(matches!(err, SceneError::State(StateError::ResourceLoad(_))));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_dispatch_moves_hover_between_buttons() {
        let mut scene = Scene::new();
        scene.add_descriptor(&descriptor("left", 0.0), &loader()).unwrap();
        scene.add_descriptor(&descriptor("right", 100.0), &loader()).unwrap();

        let report = scene.dispatch(&PointerEvent::Move {
            position: Point::new(10.0, 10.0),
        });
        assert_eq!(report.fired, vec![("left".to_string(), Guard::HoverIn)]);

        let report = scene.dispatch(&PointerEvent::Move {
            position: Point::new(110.0, 10.0),
        });
        assert_eq!(
            report.fired,
            vec![
                ("left".to_string(), Guard::HoverOut),
                ("right".to_string(), Guard::HoverIn),
            ]
        );
        assert_eq!(scene.button("left").unwrap().state(), ButtonState::Normal);
        assert_eq!(scene.button("right").unwrap().state(), ButtonState::Hovered);
        assert_eq!(scene.input().pointer_position, Point::new(110.0, 10.0));
    }

    #[test]
    fn test_rejection_does_not_stop_dispatch() {
        let mut scene = Scene::new();
        let mut visual_only = descriptor("static", 0.0);
        visual_only.hovered = None;
        scene.add_descriptor(&visual_only, &loader()).unwrap();
        scene.add_descriptor(&descriptor("live", 0.0), &loader()).unwrap();

        let report = scene.dispatch(&PointerEvent::Move {
            position: Point::new(10.0, 10.0),
        });
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].0, "static");
        assert_eq!(report.fired, vec![("live".to_string(), Guard::HoverIn)]);
        assert_eq!(scene.button("static").unwrap().state(), ButtonState::Normal);
    }

    #[test]
    fn test_click_queues_message() {
        let mut scene = Scene::new();
        scene.register_controller("menu");
        let mut play = descriptor("play", 0.0);
        play.on_release = Some(ReleaseAction {
            controller: "menu".to_string(),
            object: "router".to_string(),
            payload: json!("start"),
        });
        scene.add_descriptor(&play, &loader()).unwrap();

        let position = Point::new(10.0, 10.0);
        scene.dispatch(&PointerEvent::Move { position });
        scene.dispatch(&PointerEvent::Down {
            position,
            button: MouseButton::Left,
        });
        assert!(scene.input().is_button_pressed(MouseButton::Left));
        scene.dispatch(&PointerEvent::Up {
            position,
            button: MouseButton::Left,
        });

        assert_eq!(scene.pending_messages(), 1);
        let messages = scene.drain_messages();
        assert_eq!(messages[0].dst_controller, "menu");
        assert_eq!(messages[0].message.dst_object, "router");
        assert_eq!(messages[0].message.payload, json!("start"));
        assert_eq!(scene.pending_messages(), 0);
    }
}
