// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-decider
//!
//! A shopping cart decider built from tag tables over JSON events and
//! commands, plus helpers that construct its commands and events.
//!
//! # Design Principles
//! - All test data is deterministic (no `Utc::now()`)
//! - Time arrives inside commands, never read by the decider
//! - Fixtures are the only place that knows the cart's tags

#![allow(dead_code)]

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;

use cim_decider::{Command, Decider, Decision, Event};

pub const CART_ID: &str = "123";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

// Event tags
pub const OPENED: &str = "ShoppingCartOpened";
pub const ITEM_ADDED: &str = "ProductItemAddedToShoppingCart";
pub const ITEM_REMOVED: &str = "ProductItemRemovedFromShoppingCart";
pub const CONFIRMED: &str = "ShoppingCartConfirmed";
pub const CANCELED: &str = "ShoppingCartCanceled";

// Command tags
pub const OPEN: &str = "OpenShoppingCart";
pub const ADD_ITEM: &str = "AddProductItemToShoppingCart";
pub const REMOVE_ITEM: &str = "RemoveProductItemFromShoppingCart";
pub const CONFIRM: &str = "ConfirmShoppingCart";
pub const CANCEL: &str = "CancelShoppingCart";

/// Shopping cart lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum ShoppingCart {
    Empty,
    Pending { items: i64 },
    Closed,
}

/// Dispatcher rejection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Malformed command {command}: missing '{field}'")]
    MalformedCommand { command: String, field: String },
}

pub type CartDecider = Decider<ShoppingCart, Command, Event, CartError>;

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// ISO-8601 with millisecond precision and a `Z` suffix
pub fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn timestamp_field(command: &Command) -> Result<String, CartError> {
    command.data["now"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CartError::MalformedCommand {
            command: command.command_type.clone(),
            field: "now".to_string(),
        })
}

/// Shopping cart decider
pub fn shopping_cart() -> CartDecider {
    CartDecider::builder(|| ShoppingCart::Empty)
        .on_event(OPENED, |cart, _| match cart {
            ShoppingCart::Empty => ShoppingCart::Pending { items: 0 },
            other => other,
        })
        .on_event(ITEM_ADDED, |cart, _| match cart {
            ShoppingCart::Pending { items } => ShoppingCart::Pending { items: items + 1 },
            other => other,
        })
        .on_event(ITEM_REMOVED, |cart, _| match cart {
            ShoppingCart::Pending { items } => ShoppingCart::Pending { items: items - 1 },
            other => other,
        })
        .on_event(CONFIRMED, |cart, _| match cart {
            ShoppingCart::Pending { .. } => ShoppingCart::Closed,
            other => other,
        })
        .on_event(CANCELED, |cart, _| match cart {
            ShoppingCart::Pending { .. } => ShoppingCart::Closed,
            other => other,
        })
        .on_command(OPEN, |_, _| Ok(Decision::one(Event::new(OPENED, json!({})))))
        .on_command(ADD_ITEM, |_, _| {
            Ok(Decision::one(Event::new(ITEM_ADDED, json!({ "shoppingCartId": CART_ID }))))
        })
        .on_command(REMOVE_ITEM, |_, _| {
            Ok(Decision::one(Event::new(ITEM_REMOVED, json!({ "shoppingCartId": CART_ID }))))
        })
        .on_command(CONFIRM, |_, command: &Command| {
            let now = timestamp_field(command)?;
            Ok(Decision::one(Event::new(
                CONFIRMED,
                json!({ "shoppingCartId": CART_ID, "confirmedAt": now }),
            )))
        })
        .on_command(CANCEL, |_, command: &Command| {
            let now = timestamp_field(command)?;
            Ok(Decision::one(Event::new(
                CANCELED,
                json!({ "shoppingCartId": CART_ID, "canceledAt": now }),
            )))
        })
        .build()
}

pub fn open_cart() -> Command {
    Command::new(
        OPEN,
        json!({ "shoppingCartId": CART_ID, "clientId": "123", "now": iso(fixed_timestamp()) }),
    )
}

pub fn add_item() -> Command {
    Command::new(ADD_ITEM, json!({ "shoppingCartId": CART_ID }))
}

pub fn remove_item() -> Command {
    Command::new(REMOVE_ITEM, json!({ "shoppingCartId": CART_ID }))
}

pub fn confirm_cart(now: DateTime<Utc>) -> Command {
    Command::new(CONFIRM, json!({ "shoppingCartId": CART_ID, "now": iso(now) }))
}

pub fn cancel_cart(now: DateTime<Utc>) -> Command {
    Command::new(CANCEL, json!({ "shoppingCartId": CART_ID, "now": iso(now) }))
}

pub fn cart_opened() -> Event {
    Event::new(OPENED, json!({}))
}

pub fn item_added() -> Event {
    Event::new(ITEM_ADDED, json!({ "shoppingCartId": CART_ID }))
}

pub fn cart_confirmed(now: DateTime<Utc>) -> Event {
    Event::new(CONFIRMED, json!({ "shoppingCartId": CART_ID, "confirmedAt": iso(now) }))
}
