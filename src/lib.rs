//! Decider-driven event-sourced aggregates for the Composable Information Machine
//!
//! This crate provides the aggregate kernel: state folded from an ordered
//! event log, commands decided against that state, and a pending/committed
//! split for the caller to persist. The procedure layer on top binds named
//! async procedures to event factories and maps events to side effects.

pub mod aggregate;
pub mod config;
pub mod decider;
pub mod errors;
pub mod message;
pub mod procedure;

// Re-export commonly used types
pub use aggregate::{create_factory, Aggregate, AggregateFactory};
pub use config::{KernelConfig, UnknownCommandPolicy};
pub use decider::{Decide, Decider, DeciderBuilder, Decision, Dispatcher, Reducer};
pub use errors::{ConfigError, DispatchError, DispatchResult, DomainError, DomainResult};
pub use message::{Command, Event, Tagged};
