// Copyright (c) 2025 - Cowboy AI, Inc.
//! Domains: named async procedures that produce events

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::events::{CreateValidator, EventCatalog, EventFactory, Validator};
use crate::errors::{DomainError, DomainResult};
use crate::message::Event;

/// Events and response data returned by a procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutput {
    /// Events the procedure decided on, in order
    pub events: Vec<Event>,

    /// Procedure-specific response
    pub data: Value,
}

impl ActionOutput {
    /// Create an output
    pub fn new(events: Vec<Event>, data: Value) -> Self {
        Self { events, data }
    }
}

/// An async unit of application logic
///
/// Procedures create events only through the supplied factory, so every
/// event they emit is in the catalog and has passed validation.
#[async_trait]
pub trait Procedure<Ctx>: Send + Sync {
    /// Run the procedure
    async fn run(&self, factory: &EventFactory, input: Value, ctx: &Ctx) -> DomainResult<ActionOutput>;
}

/// Procedure backed by an async closure
pub struct FnProcedure<F> {
    f: F,
}

/// Wrap an async closure as a [`Procedure`]
///
/// The closure receives owned copies of the factory and the context.
pub fn procedure_fn<Ctx, F, Fut>(f: F) -> FnProcedure<F>
where
    F: Fn(EventFactory, Value, Ctx) -> Fut + Send + Sync,
    Fut: Future<Output = DomainResult<ActionOutput>> + Send + 'static,
{
    FnProcedure { f }
}

#[async_trait]
impl<Ctx, F, Fut> Procedure<Ctx> for FnProcedure<F>
where
    Ctx: Clone + Send + Sync + 'static,
    F: Fn(EventFactory, Value, Ctx) -> Fut + Send + Sync,
    Fut: Future<Output = DomainResult<ActionOutput>> + Send + 'static,
{
    async fn run(&self, factory: &EventFactory, input: Value, ctx: &Ctx) -> DomainResult<ActionOutput> {
        (self.f)(factory.clone(), input, ctx.clone()).await
    }
}

/// An event catalog and the procedures allowed to emit its events
pub struct Domain<Ctx> {
    factory: EventFactory,
    procedures: BTreeMap<String, Arc<dyn Procedure<Ctx>>>,
}

impl<Ctx: Send + Sync> Domain<Ctx> {
    /// Start building a domain
    pub fn builder() -> DomainBuilder<Ctx> {
        DomainBuilder {
            catalog: EventCatalog::new(),
            create_validator: None,
            procedures: BTreeMap::new(),
        }
    }

    /// Run a procedure by name
    ///
    /// # Errors
    ///
    /// `UnknownProcedure` if no procedure has that name; otherwise whatever
    /// the procedure returns.
    pub async fn execute(&self, name: &str, input: Value, ctx: &Ctx) -> DomainResult<ActionOutput> {
        let procedure = self
            .procedures
            .get(name)
            .ok_or_else(|| DomainError::UnknownProcedure(name.to_string()))?;

        let output = procedure.run(&self.factory, input, ctx).await?;

        debug!(procedure = name, events = output.events.len(), "Procedure executed");
        Ok(output)
    }

    /// The domain's event factory
    pub fn event_factory(&self) -> &EventFactory {
        &self.factory
    }

    /// Registered procedure names, sorted
    pub fn procedure_names(&self) -> impl Iterator<Item = &str> {
        self.procedures.keys().map(String::as_str)
    }
}

impl<Ctx> fmt::Debug for Domain<Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Domain")
            .field("factory", &self.factory)
            .field("procedures", &self.procedures.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Domain`]
pub struct DomainBuilder<Ctx> {
    catalog: EventCatalog,
    create_validator: Option<CreateValidator>,
    procedures: BTreeMap<String, Arc<dyn Procedure<Ctx>>>,
}

impl<Ctx: Send + Sync> DomainBuilder<Ctx> {
    /// Set the event catalog
    pub fn events(mut self, catalog: EventCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Validate payloads of events that have a schema
    ///
    /// Without this, payloads are never validated.
    pub fn validator<F>(mut self, create_validator: F) -> Self
    where
        F: Fn(&Value) -> Validator + Send + Sync + 'static,
    {
        self.create_validator = Some(Arc::new(create_validator));
        self
    }

    /// Register a procedure
    pub fn procedure<P>(mut self, name: impl Into<String>, procedure: P) -> Self
    where
        P: Procedure<Ctx> + 'static,
    {
        self.procedures.insert(name.into(), Arc::new(procedure));
        self
    }

    /// Finish the domain
    pub fn build(self) -> Domain<Ctx> {
        let factory = match &self.create_validator {
            Some(create) => EventFactory::with_validation(&self.catalog, create),
            None => EventFactory::new(&self.catalog),
        };

        Domain {
            factory,
            procedures: self.procedures,
        }
    }
}
