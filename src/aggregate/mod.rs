// Copyright (c) 2025 - Cowboy AI, Inc.
//! Event-Sourced Aggregates
//!
//! An aggregate is a [`Decide`](crate::decider::Decide) policy plus a
//! mutable event log:
//! - State is a pure fold over history
//! - Commands are decided against current state, never applied directly
//! - Each decided event is folded immediately and held as *pending*
//! - `flush()` hands pending events to the caller and marks them committed
//!
//! # Event Sourcing Pattern
//!
//! ```text
//! Command → decide() → Events → evolve() → State
//!                         ↓
//!                      pending → flush() → Event Store (caller)
//! ```
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use cim_decider::{create_factory, Command};
//!
//! let carts = create_factory(shopping_cart_decider());
//!
//! // Rehydrate from whatever the store returned
//! let mut cart = carts.create(event_store.read(cart_id)?);
//!
//! cart.dispatch(&Command::new("ConfirmShoppingCart", json!({ "now": now })))?;
//!
//! // Persist exactly what was decided, then mark it committed
//! event_store.append(cart_id, cart.flush())?;
//! ```
//!
//! # Concurrency
//!
//! No locking happens here. `dispatch` and `flush` take `&mut self`, so one
//! owner drives an aggregate at a time; callers embedding aggregates in
//! concurrent services serialize access per aggregate identity themselves.

pub mod factory;
pub mod instance;

pub use factory::{create_factory, AggregateFactory};
pub use instance::Aggregate;
