//! Interactive widgets built on the stateful object manager.
//!
//! A button binds one texture per visual state and turns raw pointer events
//! into state changes through four guards:
//! - hover-in and hover-out follow the pointer across the button's bounds
//! - press and release follow the primary mouse button while hovered
//!
//! Guard evaluation is fixed; widgets customise behavior through
//! [`ButtonCallback`] hooks.

mod button;
mod callbacks;
mod state;

pub use button::{Button, ButtonCallback, ButtonContext, ButtonDescriptor, DynButton, is_inside};
pub use callbacks::{MessageOnRelease, NoopCallback, ReleaseAction};
pub use state::{BUTTON_TRANSITIONS, ButtonState, Guard};
