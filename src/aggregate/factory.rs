// Copyright (c) 2025 - Cowboy AI, Inc.
//! Aggregate factory
//!
//! Binds a decider once and hands out aggregates, either fresh or
//! rehydrated from an event stream a persistence collaborator loaded.

use std::fmt;
use std::sync::Arc;

use super::instance::Aggregate;
use crate::decider::Decide;

/// Creates aggregates that share one decider
pub struct AggregateFactory<D> {
    decider: Arc<D>,
}

impl<D: Decide> AggregateFactory<D> {
    /// Create a factory owning the decider
    pub fn new(decider: D) -> Self {
        Self {
            decider: Arc::new(decider),
        }
    }

    /// Create a factory from an already shared decider
    pub fn from_shared(decider: Arc<D>) -> Self {
        Self { decider }
    }

    /// Create an aggregate seeded with a committed history
    pub fn create<I>(&self, history: I) -> Aggregate<D>
    where
        I: IntoIterator<Item = D::Event>,
    {
        Aggregate::rehydrate(Arc::clone(&self.decider), history)
    }

    /// Create a brand-new aggregate with no history
    pub fn create_empty(&self) -> Aggregate<D> {
        self.create(std::iter::empty())
    }

    /// The shared decider
    pub fn decider(&self) -> &Arc<D> {
        &self.decider
    }
}

impl<D> Clone for AggregateFactory<D> {
    fn clone(&self) -> Self {
        Self {
            decider: Arc::clone(&self.decider),
        }
    }
}

impl<D> fmt::Debug for AggregateFactory<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateFactory").finish_non_exhaustive()
    }
}

/// Bind a decider and return a factory for its aggregates
pub fn create_factory<D: Decide>(decider: D) -> AggregateFactory<D> {
    AggregateFactory::new(decider)
}
