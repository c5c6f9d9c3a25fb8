// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tag-Table Deciders
//!
//! Runtime mapping from message tag to handler closure. This is the
//! fallback for domains whose messages are not closed Rust enums (for
//! example JSON payloads routed by their `type` field).
//!
//! ```text
//! Reducer    : tag → (State, &Event)   → State
//! Dispatcher : tag → (&State, &Command) → Result<Decision<Event>, Error>
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let decider: Decider<Cart, Command, Event> = Decider::builder(|| Cart::Empty)
//!     .on_event("ShoppingCartOpened", |cart, _| match cart {
//!         Cart::Empty => Cart::Pending { items: 0 },
//!         other => other,
//!     })
//!     .on_command("OpenShoppingCart", |_, _| {
//!         Ok(Decision::one(Event::new("ShoppingCartOpened", json!({}))))
//!     })
//!     .build();
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use tracing::{trace, warn};

use super::{Decide, Decision};
use crate::config::{KernelConfig, UnknownCommandPolicy};
use crate::errors::DispatchError;
use crate::message::Tagged;

type ReduceFn<S, E> = Arc<dyn Fn(S, &E) -> S + Send + Sync>;
type DispatchFn<S, C, E, Err> = Arc<dyn Fn(&S, &C) -> Result<Decision<E>, Err> + Send + Sync>;
type InitFn<S> = Arc<dyn Fn() -> S + Send + Sync>;

/// Event tag → state transition function
pub struct Reducer<S, E> {
    handlers: HashMap<String, ReduceFn<S, E>>,
}

impl<S, E: Tagged> Reducer<S, E> {
    /// Create an empty reducer table (every event is the identity)
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register the transition for one event tag
    ///
    /// Registering the same tag twice replaces the earlier handler.
    pub fn on<F>(mut self, event_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(S, &E) -> S + Send + Sync + 'static,
    {
        self.handlers.insert(event_type.into(), Arc::new(handler));
        self
    }

    /// Whether a transition is registered for this tag
    pub fn handles(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Registered event tags, in no particular order
    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Apply one event; unknown tags pass the state through unchanged
    pub fn apply(&self, state: S, event: &E) -> S {
        match self.handlers.get(event.tag()) {
            Some(handler) => handler(state, event),
            None => {
                trace!(event_type = event.tag(), "No reducer registered, state unchanged");
                state
            }
        }
    }
}

impl<S, E: Tagged> Default for Reducer<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, E> Clone for Reducer<S, E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<S, E> fmt::Debug for Reducer<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducer")
            .field("event_types", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Command tag → decision function
pub struct Dispatcher<S, C, E, Err = Infallible> {
    handlers: HashMap<String, DispatchFn<S, C, E, Err>>,
}

impl<S, C: Tagged, E, Err> Dispatcher<S, C, E, Err> {
    /// Create an empty dispatcher table (every command is unknown)
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register the decision for one command tag
    ///
    /// Registering the same tag twice replaces the earlier handler.
    pub fn on<F>(mut self, command_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&S, &C) -> Result<Decision<E>, Err> + Send + Sync + 'static,
    {
        self.handlers.insert(command_type.into(), Arc::new(handler));
        self
    }

    /// Whether a decision is registered for this tag
    pub fn handles(&self, command_type: &str) -> bool {
        self.handlers.contains_key(command_type)
    }

    /// Registered command tags, in no particular order
    pub fn command_types(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Run the handler registered for the command's tag
    ///
    /// Returns `None` when no handler is registered.
    pub fn resolve(&self, state: &S, command: &C) -> Option<Result<Decision<E>, Err>> {
        self.handlers
            .get(command.tag())
            .map(|handler| handler(state, command))
    }
}

impl<S, C: Tagged, E, Err> Default for Dispatcher<S, C, E, Err> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C, E, Err> Clone for Dispatcher<S, C, E, Err> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<S, C, E, Err> fmt::Debug for Dispatcher<S, C, E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("command_types", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Reducer table + dispatcher table + initial-state constructor
///
/// Immutable once built. Holds no per-aggregate state, so one decider can
/// back any number of aggregates.
pub struct Decider<S, C, E, Err = Infallible> {
    reducer: Reducer<S, E>,
    dispatcher: Dispatcher<S, C, E, Err>,
    initial_state: InitFn<S>,
    config: KernelConfig,
}

impl<S, C: Tagged, E: Tagged, Err> Decider<S, C, E, Err> {
    /// Bundle existing tables with an initial-state constructor
    pub fn new<F>(reducer: Reducer<S, E>, dispatcher: Dispatcher<S, C, E, Err>, initial_state: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        Self {
            reducer,
            dispatcher,
            initial_state: Arc::new(initial_state),
            config: KernelConfig::default(),
        }
    }

    /// Start building a decider from its initial-state constructor
    pub fn builder<F>(initial_state: F) -> DeciderBuilder<S, C, E, Err>
    where
        F: Fn() -> S + Send + Sync + 'static,
    {
        DeciderBuilder {
            reducer: Reducer::new(),
            dispatcher: Dispatcher::new(),
            initial_state: Arc::new(initial_state),
            config: KernelConfig::default(),
        }
    }

    /// Replace the kernel configuration
    pub fn with_config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// The reducer table
    pub fn reducer(&self) -> &Reducer<S, E> {
        &self.reducer
    }

    /// The dispatcher table
    pub fn dispatcher(&self) -> &Dispatcher<S, C, E, Err> {
        &self.dispatcher
    }

    /// Active configuration
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }
}

impl<S, C, E, Err> Clone for Decider<S, C, E, Err> {
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            dispatcher: self.dispatcher.clone(),
            initial_state: Arc::clone(&self.initial_state),
            config: self.config.clone(),
        }
    }
}

impl<S, C, E, Err> fmt::Debug for Decider<S, C, E, Err> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decider")
            .field("reducer", &self.reducer)
            .field("dispatcher", &self.dispatcher)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S, C: Tagged, E: Tagged, Err> Decide for Decider<S, C, E, Err> {
    type State = S;
    type Command = C;
    type Event = E;
    type Error = Err;

    fn initial_state(&self) -> S {
        (self.initial_state)()
    }

    fn evolve(&self, state: S, event: &E) -> S {
        self.reducer.apply(state, event)
    }

    fn decide(&self, state: &S, command: &C) -> Result<Decision<E>, DispatchError<Err>> {
        match self.dispatcher.resolve(state, command) {
            Some(result) => result.map_err(DispatchError::Rejected),
            None => match self.config.unknown_commands {
                UnknownCommandPolicy::Ignore => {
                    warn!(command_type = command.tag(), "No dispatcher registered, command ignored");
                    Ok(Decision::none())
                }
                UnknownCommandPolicy::Reject => {
                    warn!(command_type = command.tag(), "No dispatcher registered, command rejected");
                    Err(DispatchError::UnhandledCommand {
                        command_type: command.tag().to_string(),
                    })
                }
            },
        }
    }
}

/// Builder for [`Decider`]
pub struct DeciderBuilder<S, C, E, Err = Infallible> {
    reducer: Reducer<S, E>,
    dispatcher: Dispatcher<S, C, E, Err>,
    initial_state: InitFn<S>,
    config: KernelConfig,
}

impl<S, C: Tagged, E: Tagged, Err> DeciderBuilder<S, C, E, Err> {
    /// Register the transition for one event tag
    pub fn on_event<F>(mut self, event_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(S, &E) -> S + Send + Sync + 'static,
    {
        self.reducer = self.reducer.on(event_type, handler);
        self
    }

    /// Register the decision for one command tag
    pub fn on_command<F>(mut self, command_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&S, &C) -> Result<Decision<E>, Err> + Send + Sync + 'static,
    {
        self.dispatcher = self.dispatcher.on(command_type, handler);
        self
    }

    /// Use a prebuilt reducer table
    pub fn reducer(mut self, reducer: Reducer<S, E>) -> Self {
        self.reducer = reducer;
        self
    }

    /// Use a prebuilt dispatcher table
    pub fn dispatcher(mut self, dispatcher: Dispatcher<S, C, E, Err>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Set the kernel configuration
    pub fn config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// Reject commands that have no registered dispatcher
    pub fn strict(mut self) -> Self {
        self.config.unknown_commands = UnknownCommandPolicy::Reject;
        self
    }

    /// Finish the decider
    pub fn build(self) -> Decider<S, C, E, Err> {
        Decider {
            reducer: self.reducer,
            dispatcher: self.dispatcher,
            initial_state: self.initial_state,
            config: self.config,
        }
    }
}
