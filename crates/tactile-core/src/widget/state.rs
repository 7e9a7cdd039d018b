//! Button states and the guards that move between them.

use crate::input::{MouseButton, PointerEvent};

/// The visual state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Pointer is over the button.
    Hovered,
    /// Primary button is held down over the button.
    Pressed,
}

/// Edges every button declares.
///
/// There is no direct Normal/Pressed edge: a press is only reachable after
/// the pointer has entered the button.
pub const BUTTON_TRANSITIONS: [(ButtonState, ButtonState); 4] = [
    (ButtonState::Hovered, ButtonState::Pressed),
    (ButtonState::Pressed, ButtonState::Hovered),
    (ButtonState::Normal, ButtonState::Hovered),
    (ButtonState::Hovered, ButtonState::Normal),
];

/// A predicate over (current state, event, hit test) that requests one
/// transition when it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Normal and the pointer is inside.
    HoverIn,
    /// Hovered and the pointer is outside.
    HoverOut,
    /// Pressed, primary button released inside.
    Release,
    /// Hovered, primary button pressed inside.
    Press,
}

impl Guard {
    /// All guards in evaluation order.
    pub const ALL: [Guard; 4] = [Guard::HoverIn, Guard::HoverOut, Guard::Release, Guard::Press];

    /// The only state this guard can fire from.
    pub fn source(self) -> ButtonState {
        match self {
            Guard::HoverIn => ButtonState::Normal,
            Guard::HoverOut | Guard::Press => ButtonState::Hovered,
            Guard::Release => ButtonState::Pressed,
        }
    }

    /// The state this guard requests.
    pub fn target(self) -> ButtonState {
        match self {
            Guard::HoverIn | Guard::Release => ButtonState::Hovered,
            Guard::HoverOut => ButtonState::Normal,
            Guard::Press => ButtonState::Pressed,
        }
    }

    /// Check if the guard fires for `event` while in `state`.
    ///
    /// `inside` is the hit test of the event position against the button's
    /// active bounds.
    pub fn is_enabled(self, state: ButtonState, event: &PointerEvent, inside: bool) -> bool {
        if state != self.source() {
            return false;
        }
        match self {
            Guard::HoverIn => inside,
            Guard::HoverOut => !inside,
            Guard::Release => inside && event.is_up(MouseButton::PRIMARY),
            Guard::Press => inside && event.is_down(MouseButton::PRIMARY),
        }
    }
}
