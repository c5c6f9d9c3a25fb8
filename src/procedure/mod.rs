// Copyright (c) 2025 - Cowboy AI, Inc.
//! Procedure Layer
//!
//! Application-side orchestration on top of the kernel:
//! - [`EventCatalog`] / [`EventFactory`]: the named events a domain may emit,
//!   with optional payload validation
//! - [`Domain`]: named async procedures that decide on events
//! - [`EffectMap`] / [`Adapter`]: events translated into side effects as data
//!
//! # Flow
//!
//! ```text
//! input, ctx → Domain::execute(name) → { events, data }
//!                     ↓
//!              Adapter::handle(name) → { events, effects, data }
//! ```
//!
//! Nothing here performs I/O. Effects are values for the caller to execute.

pub mod domain;
pub mod effects;
pub mod events;

pub use domain::{procedure_fn, ActionOutput, Domain, DomainBuilder, FnProcedure, Procedure};
pub use effects::{Adapter, EffectMap, HandlerOutput};
pub use events::{CreateValidator, EventCatalog, EventFactory, Validator};
