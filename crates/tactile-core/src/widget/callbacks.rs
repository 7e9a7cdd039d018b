//! Stock button hooks.

use serde::{Deserialize, Serialize};

use super::button::{ButtonCallback, ButtonContext};
use crate::message::Message;

/// Hooks that do nothing beyond the built-in state handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallback;

impl ButtonCallback for NoopCallback {
    fn on_button_pressed(&mut self, _cx: &mut ButtonContext<'_>) {}
    fn on_button_released(&mut self, _cx: &mut ButtonContext<'_>) {}
    fn on_mouse_hovered(&mut self, _cx: &mut ButtonContext<'_>) {}
    fn on_mouse_unhovered(&mut self, _cx: &mut ButtonContext<'_>) {}
}

/// Where a released button sends its message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAction {
    /// Destination controller.
    pub controller: String,
    /// Destination object within that controller.
    pub object: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Sends a message every time the button is released (a click).
#[derive(Debug, Clone)]
pub struct MessageOnRelease {
    action: ReleaseAction,
    sent: usize,
}

impl MessageOnRelease {
    pub fn new(action: ReleaseAction) -> Self {
        Self { action, sent: 0 }
    }

    pub fn action(&self) -> &ReleaseAction {
        &self.action
    }

    /// Number of messages handed to the sink successfully.
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl ButtonCallback for MessageOnRelease {
    fn on_button_pressed(&mut self, _cx: &mut ButtonContext<'_>) {}

    fn on_button_released(&mut self, cx: &mut ButtonContext<'_>) {
        let message = Message::new(self.action.payload.clone());
        match cx.send_message(&self.action.controller, &self.action.object, message) {
            Ok(()) => self.sent += 1,
            // Delivery failures belong to the messaging layer; the click still happened.
            Err(e) => log::warn!("Button '{}' failed to send release message: {}", cx.name(), e),
        }
    }

    fn on_mouse_hovered(&mut self, _cx: &mut ButtonContext<'_>) {}
    fn on_mouse_unhovered(&mut self, _cx: &mut ButtonContext<'_>) {}
}
