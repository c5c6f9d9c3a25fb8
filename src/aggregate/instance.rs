// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregate Instance
//!
//! Stateful wrapper around a [`Decide`] policy and an append-only event log.
//!
//! ```text
//!            dispatch(cmd)                 flush()
//! committed ─────────────── pending ──────────────→ committed
//!     │                        │
//!     └──── fold ──────────────┴──→ state
//! ```
//!
//! # Invariant
//!
//! At every point a caller can observe:
//!
//! ```text
//! state == fold(initial_state(), committed ++ pending)
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::decider::Decide;
use crate::errors::DispatchResult;

/// One event-sourced aggregate: derived state, history, and pending events
///
/// Mutation requires `&mut self`, so a single owner serializes access. The
/// decider is shared through an `Arc` and never mutated.
pub struct Aggregate<D: Decide> {
    decider: Arc<D>,
    state: D::State,
    committed: Vec<D::Event>,
    pending: Vec<D::Event>,
}

impl<D: Decide> Aggregate<D> {
    /// Rebuild an aggregate by folding a committed history
    ///
    /// The history becomes the committed log; nothing is pending.
    pub fn rehydrate<I>(decider: Arc<D>, history: I) -> Self
    where
        I: IntoIterator<Item = D::Event>,
    {
        let committed: Vec<D::Event> = history.into_iter().collect();
        let state = decider.fold(&committed);

        debug!(history_len = committed.len(), "Rehydrated aggregate");

        Self {
            decider,
            state,
            committed,
            pending: Vec::new(),
        }
    }

    /// Current derived state
    pub fn get_state(&self) -> &D::State {
        &self.state
    }

    /// Events already considered durable
    pub fn committed_events(&self) -> &[D::Event] {
        &self.committed
    }

    /// Borrowing iterator over committed then pending events
    pub fn iter_events(&self) -> impl Iterator<Item = &D::Event> {
        self.committed.iter().chain(self.pending.iter())
    }

    /// Total number of events (committed + pending)
    pub fn version(&self) -> u64 {
        (self.committed.len() + self.pending.len()) as u64
    }

    /// Number of committed events
    pub fn committed_version(&self) -> u64 {
        self.committed.len() as u64
    }

    /// Whether any events are waiting to be flushed
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The decision policy backing this aggregate
    pub fn decider(&self) -> &D {
        &self.decider
    }
}

impl<D> Aggregate<D>
where
    D: Decide,
    D::State: Clone,
    D::Event: Clone,
{
    /// Evaluate a command and apply whatever events it produces
    ///
    /// Events are applied one at a time, so event *k* sees the state left by
    /// events `1..k`. They are appended to the pending log in the same order.
    /// Returns the number of events produced.
    ///
    /// # Errors
    ///
    /// Whatever the decider returns, untouched. On error the aggregate is
    /// left exactly as it was.
    pub fn dispatch(&mut self, command: &D::Command) -> DispatchResult<usize, D::Error> {
        let decision = self.decider.decide(&self.state, command)?;
        let produced = decision.len();

        if produced == 0 {
            trace!("Command produced no events");
            return Ok(0);
        }

        let next = self.decider.fold_from(self.state.clone(), decision.events());
        self.state = next;
        self.pending.extend(decision.into_events());

        debug!(
            produced,
            pending = self.pending.len(),
            version = self.version(),
            "Command dispatched"
        );

        Ok(produced)
    }

    /// Snapshot of committed events followed by pending events
    pub fn all_events(&self) -> Vec<D::Event> {
        self.iter_events().cloned().collect()
    }

    /// Snapshot of events produced since the last flush
    pub fn pending_events(&self) -> Vec<D::Event> {
        self.pending.clone()
    }

    /// Move every pending event to the end of the committed log
    ///
    /// Returns the events that were moved, in production order, for the
    /// caller to persist. With nothing pending this returns an empty vector
    /// and changes nothing.
    pub fn flush(&mut self) -> Vec<D::Event> {
        let flushed = std::mem::take(&mut self.pending);
        self.committed.extend(flushed.iter().cloned());

        debug!(
            flushed = flushed.len(),
            committed = self.committed.len(),
            "Flushed pending events"
        );

        flushed
    }
}

impl<D> Clone for Aggregate<D>
where
    D: Decide,
    D::State: Clone,
    D::Event: Clone,
{
    fn clone(&self) -> Self {
        Self {
            decider: Arc::clone(&self.decider),
            state: self.state.clone(),
            committed: self.committed.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<D> fmt::Debug for Aggregate<D>
where
    D: Decide,
    D::State: fmt::Debug,
    D::Event: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("state", &self.state)
            .field("committed", &self.committed)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
