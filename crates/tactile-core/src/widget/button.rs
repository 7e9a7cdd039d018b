//! Button widget and guard dispatch.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::callbacks::ReleaseAction;
use super::state::{BUTTON_TRANSITIONS, ButtonState, Guard};
use crate::input::PointerEvent;
use crate::message::{Message, MessageResult, MessageSink};
use crate::state::{StateError, StateResult, StatefulObjectManager};
use crate::texture::{AssetLoader, Texture};

/// Strict hit test: a point on the boundary is outside.
pub fn is_inside(rect: Rect, point: Point) -> bool {
    rect.x0 < point.x && point.x < rect.x1 && rect.y0 < point.y && point.y < rect.y1
}

/// Hooks invoked after a guard fires and its transition succeeds.
///
/// Geometry is already resynchronised with the new state when a hook runs.
pub trait ButtonCallback: Debug {
    /// Primary button went down over a hovered button.
    fn on_button_pressed(&mut self, cx: &mut ButtonContext<'_>);

    /// Primary button went up over a pressed button.
    fn on_button_released(&mut self, cx: &mut ButtonContext<'_>);

    /// Pointer entered the button.
    fn on_mouse_hovered(&mut self, cx: &mut ButtonContext<'_>);

    /// Pointer left the button.
    fn on_mouse_unhovered(&mut self, cx: &mut ButtonContext<'_>);
}

impl<C: ButtonCallback + ?Sized> ButtonCallback for Box<C> {
    fn on_button_pressed(&mut self, cx: &mut ButtonContext<'_>) {
        (**self).on_button_pressed(cx)
    }

    fn on_button_released(&mut self, cx: &mut ButtonContext<'_>) {
        (**self).on_button_released(cx)
    }

    fn on_mouse_hovered(&mut self, cx: &mut ButtonContext<'_>) {
        (**self).on_mouse_hovered(cx)
    }

    fn on_mouse_unhovered(&mut self, cx: &mut ButtonContext<'_>) {
        (**self).on_mouse_unhovered(cx)
    }
}

/// What a hook can see and do while it runs.
pub struct ButtonContext<'a> {
    name: &'a str,
    state: ButtonState,
    bounds: Rect,
    sink: &'a mut dyn MessageSink,
}

impl ButtonContext<'_> {
    /// Name of the button the hook runs for.
    pub fn name(&self) -> &str {
        self.name
    }

    /// State after the transition.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Bounds after the transition.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Send `message` to `dst_object` owned by `dst_controller`.
    pub fn send_message(
        &mut self,
        dst_controller: &str,
        dst_object: &str,
        mut message: Message,
    ) -> MessageResult<()> {
        message.src_object = self.name.to_string();
        message.dst_object = dst_object.to_string();
        self.sink.send(dst_controller, message)
    }
}

/// Declarative description of a basic button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonDescriptor {
    /// Name, unique within the scene.
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Texture for the normal state.
    pub normal: String,
    /// Texture for the hovered state. Left unbound when absent or empty.
    #[serde(default)]
    pub hovered: Option<String>,
    /// Texture for the pressed state. Left unbound when absent or empty.
    #[serde(default)]
    pub pressed: Option<String>,
    /// Message to send when the button is released.
    #[serde(default)]
    pub on_release: Option<ReleaseAction>,
}

/// A clickable button with one texture per [`ButtonState`].
#[derive(Debug)]
pub struct Button<C> {
    name: String,
    state_manager: StatefulObjectManager<Texture, ButtonState>,
    callback: C,
}

/// A button with boxed hooks, for heterogeneous collections.
pub type DynButton = Button<Box<dyn ButtonCallback>>;

impl<C: ButtonCallback> Button<C> {
    /// Wrap an initialised state manager.
    ///
    /// The manager's bindings and edges are used as-is.
    pub fn new(
        name: impl Into<String>,
        state_manager: StatefulObjectManager<Texture, ButtonState>,
        callback: C,
    ) -> StateResult<Self> {
        if !state_manager.is_initialized() {
            return Err(StateError::PreconditionViolation(
                "button state manager has no initial state",
            ));
        }
        Ok(Self {
            name: name.into(),
            state_manager,
            callback,
        })
    }

    /// Build a basic button: load its textures and declare the standard edges.
    ///
    /// The normal texture is required. Missing hovered/pressed textures leave
    /// those states unbound, so the button simply never enters them.
    pub fn from_descriptor(
        descriptor: &ButtonDescriptor,
        loader: &dyn AssetLoader,
        callback: C,
    ) -> StateResult<Self> {
        let name = &descriptor.name;
        let position = Point::new(descriptor.x, descriptor.y);

        let mut state_manager = StatefulObjectManager::new();
        state_manager.try_set_init_stateful_object(ButtonState::Normal, || {
            Texture::load(loader, &descriptor.normal, format!("{name}_normal"), position)
        })?;

        let optional = [
            (ButtonState::Hovered, &descriptor.hovered, "hovered"),
            (ButtonState::Pressed, &descriptor.pressed, "pressed"),
        ];
        for (state, path, suffix) in optional {
            let Some(path) = path.as_deref().filter(|path| !path.is_empty()) else {
                continue;
            };
            state_manager.try_bind_stateful_object(state, || {
                Texture::load(loader, path, format!("{name}_{suffix}"), position)
            })?;
        }

        for (from, to) in BUTTON_TRANSITIONS {
            state_manager.set_state_transition(from, to)?;
        }

        Self::new(name.clone(), state_manager, callback)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current visual state.
    pub fn state(&self) -> ButtonState {
        // The manager is checked for an initial state at construction.
        self.state_manager.active_state().unwrap_or_default()
    }

    /// Texture bound to the current state.
    pub fn active_texture(&self) -> Option<&Texture> {
        self.state_manager.active_state_object().ok()
    }

    /// Bounds of the active texture.
    pub fn bounds(&self) -> Rect {
        self.active_texture()
            .map(Texture::render_rect)
            .unwrap_or(Rect::ZERO)
    }

    pub fn x(&self) -> f64 {
        self.bounds().x0
    }

    pub fn y(&self) -> f64 {
        self.bounds().y0
    }

    pub fn width(&self) -> f64 {
        self.bounds().width()
    }

    pub fn height(&self) -> f64 {
        self.bounds().height()
    }

    /// Read access to the underlying state manager.
    pub fn state_manager(&self) -> &StatefulObjectManager<Texture, ButtonState> {
        &self.state_manager
    }

    pub fn callback(&self) -> &C {
        &self.callback
    }

    pub fn callback_mut(&mut self) -> &mut C {
        &mut self.callback
    }

    /// Check if `point` is strictly inside the active bounds.
    pub fn contains(&self, point: Point) -> bool {
        is_inside(self.bounds(), point)
    }

    /// The guard that fires for `event` in the current state, if any.
    pub fn fired_guard(&self, event: &PointerEvent) -> Option<Guard> {
        let state = self.state();
        let inside = self.contains(event.position());
        Guard::ALL
            .into_iter()
            .find(|guard| guard.is_enabled(state, event, inside))
    }

    /// Run the guards against `event`.
    ///
    /// At most one guard fires. If its transition succeeds the matching hook
    /// is invoked and the guard is returned; a rejected transition is
    /// returned as an error and leaves the state unchanged.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        sink: &mut dyn MessageSink,
    ) -> StateResult<Option<Guard>> {
        let Some(guard) = self.fired_guard(event) else {
            return Ok(None);
        };

        self.state_manager.state_transition(guard.target())?;
        log::debug!(
            "Button '{}' {:?} -> {:?} ({:?})",
            self.name,
            guard.source(),
            guard.target(),
            guard
        );

        let state = self.state();
        let bounds = self.bounds();
        let mut cx = ButtonContext {
            name: &self.name,
            state,
            bounds,
            sink,
        };
        match guard {
            Guard::HoverIn => self.callback.on_mouse_hovered(&mut cx),
            Guard::HoverOut => self.callback.on_mouse_unhovered(&mut cx),
            Guard::Press => self.callback.on_button_pressed(&mut cx),
            Guard::Release => self.callback.on_button_released(&mut cx),
        }
        Ok(Some(guard))
    }

    /// Request a transition directly, bypassing the guards and hooks.
    pub fn request_transition(&mut self, target: ButtonState) -> StateResult<()> {
        let from = self.state();
        self.state_manager.state_transition(target)?;
        log::debug!("Button '{}' {:?} -> {:?} (requested)", self.name, from, target);
        Ok(())
    }
}

impl<C: ButtonCallback + 'static> Button<C> {
    /// Erase the hook type.
    pub fn boxed(self) -> DynButton {
        Button {
            name: self.name,
            state_manager: self.state_manager,
            callback: Box::new(self.callback),
        }
    }
}
