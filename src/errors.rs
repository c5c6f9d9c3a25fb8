// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for the decider kernel and the procedure layer

use thiserror::Error;

/// Errors returned by `Aggregate::dispatch`
///
/// The kernel adds no failure modes of its own beyond the optional strict
/// handling of unknown commands. Anything the dispatcher returns is carried
/// through untouched.
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// The dispatcher rejected the command
    #[error(transparent)]
    Rejected(E),

    /// No dispatcher is registered for this command tag (strict mode only)
    #[error("No dispatcher registered for command '{command_type}'")]
    UnhandledCommand {
        /// Tag of the command that had no handler
        command_type: String,
    },
}

impl<E> DispatchError<E> {
    /// Return the dispatcher's own error, if this is a rejection
    pub fn into_rejection(self) -> Option<E> {
        match self {
            DispatchError::Rejected(err) => Some(err),
            DispatchError::UnhandledCommand { .. } => None,
        }
    }

    /// Whether this error came from strict unknown-command handling
    pub fn is_unhandled(&self) -> bool {
        matches!(self, DispatchError::UnhandledCommand { .. })
    }
}

impl<E> From<E> for DispatchError<E> {
    fn from(err: E) -> Self {
        DispatchError::Rejected(err)
    }
}

/// Result type for aggregate dispatch
pub type DispatchResult<T, E> = Result<T, DispatchError<E>>;

/// Errors that can occur in the procedure layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Event name is not part of the event catalog
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// Procedure name is not registered on the domain
    #[error("Unknown procedure: {0}")]
    UnknownProcedure(String),

    /// Event payload failed validation
    #[error("Invalid payload for event '{event}': {reason}")]
    InvalidPayload {
        /// Event name
        event: String,
        /// Validator message
        reason: String,
    },

    /// Payload could not be converted to JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A procedure failed
    #[error("Procedure failed: {0}")]
    Procedure(String),
}

/// Result type for procedure layer operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Errors raised while loading kernel configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting had a value outside its allowed set
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue {
        /// Setting name
        key: String,
        /// Rejected value
        value: String,
    },
}
