//! Tactile Core Library
//!
//! Platform-agnostic state handling for Tactile widgets: a generic stateful
//! object manager, the button interaction protocol built on it, and the
//! small scene/messaging layer that drives buttons from raw pointer events.

pub mod input;
pub mod message;
pub mod scene;
pub mod state;
pub mod texture;
pub mod widget;

pub use input::{InputState, MouseButton, PointerEvent};
pub use message::{Envelope, Message, MessageError, MessageResult, MessageSink, Outbox};
pub use scene::{DispatchReport, Scene, SceneError, SceneResult};
pub use state::{StateError, StateResult, StatefulObjectManager};
pub use texture::{AssetError, AssetLoader, AssetResult, MemoryAssetLoader, Texture, TextureHandle, TextureId};
pub use widget::{
    Button, ButtonCallback, ButtonContext, ButtonDescriptor, ButtonState, DynButton, Guard,
    MessageOnRelease, NoopCallback, ReleaseAction,
};
