// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event and Command Shape Contract
//!
//! Every message the kernel handles is a tagged record: a discriminating
//! `type` plus an opaque `data` payload.
//!
//! ```text
//! { "type": "ShoppingCartOpened", "data": { ... } }
//! ```
//!
//! The kernel only ever looks at the tag. Domains that model their events
//! as Rust enums implement [`Tagged`] directly and never touch [`Event`] or
//! [`Command`]; the generic envelopes exist for domains that keep payloads
//! as JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A value with a discriminating tag
pub trait Tagged {
    /// The tag used to route this value to a reducer or dispatcher
    fn tag(&self) -> &str;
}

impl<T: Tagged + ?Sized> Tagged for &T {
    fn tag(&self) -> &str {
        (**self).tag()
    }
}

/// An immutable fact that happened to an aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event<D = Value> {
    /// Event tag
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event payload
    pub data: D,
}

impl<D> Event<D> {
    /// Create a new event
    pub fn new(event_type: impl Into<String>, data: D) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }
}

impl<D> Tagged for Event<D> {
    fn tag(&self) -> &str {
        &self.event_type
    }
}

/// A request to change an aggregate's state
///
/// Commands are consumed by dispatch and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command<D = Value> {
    /// Command tag
    #[serde(rename = "type")]
    pub command_type: String,

    /// Command payload
    pub data: D,
}

impl<D> Command<D> {
    /// Create a new command
    pub fn new(command_type: impl Into<String>, data: D) -> Self {
        Self {
            command_type: command_type.into(),
            data,
        }
    }
}

impl<D> Tagged for Command<D> {
    fn tag(&self) -> &str {
        &self.command_type
    }
}
