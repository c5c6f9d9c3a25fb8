// Copyright (c) 2025 - Cowboy AI, Inc.
//! Effect Mapping
//!
//! Translates emitted events into side effects described as data. The
//! effects are returned, never performed; an executor owned by the caller
//! interprets them.
//!
//! ```text
//! Domain::execute → [Event] → EffectMap::to_effects → [Effect] → caller executes
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use super::domain::Domain;
use crate::errors::DomainResult;
use crate::message::{Event, Tagged};

type EffectFn<Eff> = Arc<dyn Fn(&Event) -> Vec<Eff> + Send + Sync>;

/// Event name → effects it implies
pub struct EffectMap<Eff> {
    mappers: HashMap<String, EffectFn<Eff>>,
}

impl<Eff> EffectMap<Eff> {
    /// Create an empty map (no event produces effects)
    pub fn new() -> Self {
        Self {
            mappers: HashMap::new(),
        }
    }

    /// Register the effects for one event name
    pub fn on<F>(mut self, event_type: impl Into<String>, mapper: F) -> Self
    where
        F: Fn(&Event) -> Vec<Eff> + Send + Sync + 'static,
    {
        self.mappers.insert(event_type.into(), Arc::new(mapper));
        self
    }

    /// Whether a mapper is registered for this event name
    pub fn handles(&self, event_type: &str) -> bool {
        self.mappers.contains_key(event_type)
    }

    /// Map events to effects
    ///
    /// Effects come out in event order, and within one event in the order
    /// its mapper returned them. Events with no mapper contribute nothing.
    pub fn to_effects(&self, events: &[Event]) -> Vec<Eff> {
        events
            .iter()
            .flat_map(|event| match self.mappers.get(event.tag()) {
                Some(mapper) => mapper(event),
                None => {
                    trace!(event_type = event.tag(), "No effect mapper registered");
                    Vec::new()
                }
            })
            .collect()
    }
}

impl<Eff> Default for EffectMap<Eff> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Eff> Clone for EffectMap<Eff> {
    fn clone(&self) -> Self {
        Self {
            mappers: self.mappers.clone(),
        }
    }
}

impl<Eff> fmt::Debug for EffectMap<Eff> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectMap")
            .field("event_types", &self.mappers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Result of running a procedure through an [`Adapter`]
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutput<Eff> {
    /// Events the procedure emitted
    pub events: Vec<Event>,

    /// Effects implied by those events
    pub effects: Vec<Eff>,

    /// Procedure-specific response
    pub data: Value,
}

/// Binds a domain to an effect map
pub struct Adapter<Ctx, Eff> {
    domain: Arc<Domain<Ctx>>,
    effects: EffectMap<Eff>,
}

impl<Ctx: Send + Sync, Eff> Adapter<Ctx, Eff> {
    /// Create an adapter over a shared domain
    pub fn new(domain: Arc<Domain<Ctx>>, effects: EffectMap<Eff>) -> Self {
        Self { domain, effects }
    }

    /// Run a procedure and derive its effects
    pub async fn handle(&self, name: &str, input: Value, ctx: &Ctx) -> DomainResult<HandlerOutput<Eff>> {
        let output = self.domain.execute(name, input, ctx).await?;
        let effects = self.effects.to_effects(&output.events);

        debug!(procedure = name, effects = effects.len(), "Handler produced effects");

        Ok(HandlerOutput {
            events: output.events,
            effects,
            data: output.data,
        })
    }

    /// Map events to effects without running a procedure
    pub fn to_effects(&self, events: &[Event]) -> Vec<Eff> {
        self.effects.to_effects(events)
    }

    /// The underlying domain
    pub fn domain(&self) -> &Arc<Domain<Ctx>> {
        &self.domain
    }
}

impl<Ctx, Eff> Clone for Adapter<Ctx, Eff> {
    fn clone(&self) -> Self {
        Self {
            domain: Arc::clone(&self.domain),
            effects: self.effects.clone(),
        }
    }
}

impl<Ctx, Eff> fmt::Debug for Adapter<Ctx, Eff> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("domain", &self.domain)
            .field("effects", &self.effects)
            .finish()
    }
}
