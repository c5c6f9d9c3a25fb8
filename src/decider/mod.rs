// Copyright (c) 2025 - Cowboy AI, Inc.
//! Decider Pattern
//!
//! A decider is the complete decision policy for one aggregate type:
//!
//! ```text
//! initial_state : ()               → State
//! evolve        : (State, Event)   → State
//! decide        : (State, Command) → Result<[Event], Error>
//! ```
//!
//! # Two Ways to Build One
//!
//! ## 1. Exhaustive match
//!
//! Implement [`Decide`] directly on a unit struct and `match` over your
//! event and command enums. The compiler checks that every variant is
//! handled.
//!
//! ```rust,ignore
//! struct Cart;
//!
//! impl Decide for Cart {
//!     type State = CartState;
//!     type Command = CartCommand;
//!     type Event = CartEvent;
//!     type Error = CartError;
//!
//!     fn initial_state(&self) -> CartState {
//!         CartState::Empty
//!     }
//!
//!     fn evolve(&self, state: CartState, event: &CartEvent) -> CartState {
//!         match (state, event) {
//!             (CartState::Empty, CartEvent::Opened) => CartState::Pending { items: 0 },
//!             (state, _) => state,
//!         }
//!     }
//!
//!     fn decide(&self, state: &CartState, command: &CartCommand)
//!         -> Result<Decision<CartEvent>, DispatchError<CartError>>
//!     {
//!         match command {
//!             CartCommand::Open => Ok(Decision::one(CartEvent::Opened)),
//!         }
//!     }
//! }
//! ```
//!
//! ## 2. Tag tables
//!
//! Register one closure per event tag and per command tag on a
//! [`Decider`]. Unknown event tags fold as the identity and unknown command
//! tags are no-ops (or errors, under [`UnknownCommandPolicy::Reject`]).
//!
//! [`UnknownCommandPolicy::Reject`]: crate::config::UnknownCommandPolicy::Reject

pub mod table;

pub use table::{Decider, DeciderBuilder, Dispatcher, Reducer};

use crate::errors::DispatchError;

/// Decision policy for one aggregate type
///
/// Implementations must be pure: no I/O, no clock reads, no randomness.
/// Anything time-dependent arrives inside the command.
pub trait Decide {
    /// Aggregate state, derived by folding events
    type State;

    /// Commands this aggregate accepts
    type Command;

    /// Events this aggregate produces and applies
    type Event;

    /// Domain rejection raised by `decide`
    type Error;

    /// Fresh state before any event has been applied
    fn initial_state(&self) -> Self::State;

    /// Apply one event to the state
    ///
    /// Must be total. Events the aggregate does not recognise, or that
    /// arrive in an incompatible lifecycle phase, return the state unchanged.
    fn evolve(&self, state: Self::State, event: &Self::Event) -> Self::State;

    /// Evaluate a command against the current state
    fn decide(
        &self,
        state: &Self::State,
        command: &Self::Command,
    ) -> Result<Decision<Self::Event>, DispatchError<Self::Error>>;

    /// Fold a sequence of events starting from `initial_state`
    fn fold<'a, I>(&self, events: I) -> Self::State
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        self.fold_from(self.initial_state(), events)
    }

    /// Fold a sequence of events starting from an existing state
    fn fold_from<'a, I>(&self, state: Self::State, events: I) -> Self::State
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        events
            .into_iter()
            .fold(state, |state, event| self.evolve(state, event))
    }
}

impl<D: Decide + ?Sized> Decide for std::sync::Arc<D> {
    type State = D::State;
    type Command = D::Command;
    type Event = D::Event;
    type Error = D::Error;

    fn initial_state(&self) -> Self::State {
        (**self).initial_state()
    }

    fn evolve(&self, state: Self::State, event: &Self::Event) -> Self::State {
        (**self).evolve(state, event)
    }

    fn decide(
        &self,
        state: &Self::State,
        command: &Self::Command,
    ) -> Result<Decision<Self::Event>, DispatchError<Self::Error>> {
        (**self).decide(state, command)
    }
}

/// Ordered events produced by one command
///
/// A dispatcher may answer with nothing, a single event, or several; this
/// normalizes all three to one ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision<E> {
    events: Vec<E>,
}

impl<E> Decision<E> {
    /// No events: the command is not applicable
    pub fn none() -> Self {
        Self { events: Vec::new() }
    }

    /// Exactly one event
    pub fn one(event: E) -> Self {
        Self { events: vec![event] }
    }

    /// Several events, applied in iteration order
    pub fn many(events: impl IntoIterator<Item = E>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the decision produced no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Borrow the events
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Take the events
    pub fn into_events(self) -> Vec<E> {
        self.events
    }
}

impl<E> Default for Decision<E> {
    fn default() -> Self {
        Self::none()
    }
}

impl<E> From<Vec<E>> for Decision<E> {
    fn from(events: Vec<E>) -> Self {
        Self { events }
    }
}

impl<E> FromIterator<E> for Decision<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::many(iter)
    }
}

impl<E> IntoIterator for Decision<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
