// Copyright (c) 2025 - Cowboy AI, Inc.
//! Named event constructors with optional payload validation

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::errors::{DomainError, DomainResult};
use crate::message::Event;

/// Checks one event payload
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Builds a [`Validator`] from an event's schema
pub type CreateValidator = Arc<dyn Fn(&Value) -> Validator + Send + Sync>;

/// The set of events a domain may emit, keyed by name
///
/// Each name may carry a schema. The schema is opaque here; it is handed to
/// the validator factory as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventCatalog {
    schemas: BTreeMap<String, Option<Value>>,
}

impl EventCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event with no schema
    pub fn define(mut self, name: impl Into<String>) -> Self {
        self.schemas.insert(name.into(), None);
        self
    }

    /// Add an event with a schema
    pub fn define_with_schema(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.schemas.insert(name.into(), Some(schema));
        self
    }

    /// Whether the event name is defined
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Schema for an event, if it has one
    pub fn schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name).and_then(Option::as_ref)
    }

    /// Defined event names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Number of defined events
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Creates catalog events, validating payloads where a validator exists
///
/// Cheap to clone; clones share the same validators.
#[derive(Clone, Default)]
pub struct EventFactory {
    validators: Arc<BTreeMap<String, Option<Validator>>>,
}

impl EventFactory {
    /// Factory that never validates payloads
    pub fn new(catalog: &EventCatalog) -> Self {
        Self::build(catalog, None)
    }

    /// Factory that validates every event which has a schema
    pub fn with_validation(catalog: &EventCatalog, create_validator: &CreateValidator) -> Self {
        Self::build(catalog, Some(create_validator))
    }

    fn build(catalog: &EventCatalog, create_validator: Option<&CreateValidator>) -> Self {
        let validators = catalog
            .schemas
            .iter()
            .map(|(name, schema)| {
                let validator = match (schema, create_validator) {
                    (Some(schema), Some(create)) => Some(create(schema)),
                    _ => None,
                };
                (name.clone(), validator)
            })
            .collect();

        Self {
            validators: Arc::new(validators),
        }
    }

    /// Create an event from a serializable payload
    ///
    /// # Errors
    ///
    /// - `UnknownEvent` if the name is not in the catalog
    /// - `Serialization` if the payload cannot become JSON
    /// - `InvalidPayload` if the event's validator refuses the payload
    pub fn create<T: Serialize>(&self, name: &str, payload: T) -> DomainResult<Event> {
        let validator = self
            .validators
            .get(name)
            .ok_or_else(|| DomainError::UnknownEvent(name.to_string()))?;

        let data = serde_json::to_value(payload)?;

        if let Some(validate) = validator {
            validate(&data).map_err(|reason| DomainError::InvalidPayload {
                event: name.to_string(),
                reason,
            })?;
        }

        trace!(event_type = name, "Created event");
        Ok(Event::new(name, data))
    }

    /// Whether the factory can create this event
    pub fn defines(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Event names this factory can create, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }
}

impl fmt::Debug for EventFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validated: Vec<_> = self
            .validators
            .iter()
            .filter(|(_, v)| v.is_some())
            .map(|(name, _)| name.as_str())
            .collect();

        f.debug_struct("EventFactory")
            .field("events", &self.names().collect::<Vec<_>>())
            .field("validated", &validated)
            .finish()
    }
}
