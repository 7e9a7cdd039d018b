//! Outbound messages between scene objects and controllers.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Message delivery errors.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Unknown controller: {0}")]
    UnknownController(String),
}

/// Result type for message delivery.
pub type MessageResult<T> = Result<T, MessageError>;

/// A message routed to an object owned by some controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Name of the sending object (stamped on send).
    #[serde(default)]
    pub src_object: String,
    /// Name of the destination object (stamped on send).
    #[serde(default)]
    pub dst_object: String,
    /// Free-form payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Message {
    /// Create an unaddressed message carrying `payload`.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            src_object: String::new(),
            dst_object: String::new(),
            payload,
        }
    }
}

/// The outbound-send primitive.
pub trait MessageSink {
    /// Hand `message` off to the controller named `dst_controller`.
    fn send(&mut self, dst_controller: &str, message: Message) -> MessageResult<()>;
}

/// A message together with the controller it is addressed to.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub dst_controller: String,
    pub message: Message,
}

/// Queue of outbound messages for a set of known controllers.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    controllers: HashSet<String>,
    queue: VecDeque<Envelope>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow delivery to `name`.
    pub fn register_controller(&mut self, name: impl Into<String>) {
        self.controllers.insert(name.into());
    }

    pub fn has_controller(&self, name: &str) -> bool {
        self.controllers.contains(name)
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take all queued messages in send order.
    pub fn drain(&mut self) -> impl Iterator<Item = Envelope> + '_ {
        self.queue.drain(..)
    }
}

impl MessageSink for Outbox {
    fn send(&mut self, dst_controller: &str, message: Message) -> MessageResult<()> {
        if !self.controllers.contains(dst_controller) {
            return Err(MessageError::UnknownController(dst_controller.to_string()));
        }
        self.queue.push_back(Envelope {
            dst_controller: dst_controller.to_string(),
            message,
        });
        Ok(())
    }
}
