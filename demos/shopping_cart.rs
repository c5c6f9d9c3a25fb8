// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shopping Cart Example
//!
//! Drives a shopping cart aggregate through its lifecycle using a decider
//! written as an exhaustive `match` over typed commands and events.
//!
//! # Example Flow
//!
//! ```text
//! Command ──> decide ──> [Event] ──> evolve ──> State
//!                           │
//!                           └──> pending ──flush──> store
//!                                                     │
//! create(store) ──> evolve* ──> State  <──────────────┘
//! ```
//!
//! Run with `RUST_LOG=cim_decider=debug` to see kernel logging.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cim_decider::{create_factory, Decide, Decision, DispatchError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum CartState {
    Empty,
    Pending { cart_id: Uuid, items: u32 },
    Closed { cart_id: Uuid },
}

#[derive(Debug, Clone)]
enum CartCommand {
    Open { cart_id: Uuid, client_id: Uuid, now: DateTime<Utc> },
    AddItem { product_id: Uuid },
    RemoveItem { product_id: Uuid },
    Confirm { now: DateTime<Utc> },
    Cancel { now: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
enum CartEvent {
    Opened { cart_id: Uuid, client_id: Uuid, opened_at: DateTime<Utc> },
    ItemAdded { cart_id: Uuid, product_id: Uuid },
    ItemRemoved { cart_id: Uuid, product_id: Uuid },
    Confirmed { cart_id: Uuid, confirmed_at: DateTime<Utc> },
    Canceled { cart_id: Uuid, canceled_at: DateTime<Utc> },
}

#[derive(Debug, thiserror::Error)]
enum CartError {
    #[error("Cart is not open")]
    NotOpen,
    #[error("Cart is already open")]
    AlreadyOpen,
    #[error("Cart has no items to remove")]
    NothingToRemove,
}

struct ShoppingCart;

impl ShoppingCart {
    fn open_cart(state: &CartState) -> Result<Uuid, CartError> {
        match state {
            CartState::Pending { cart_id, .. } => Ok(*cart_id),
            _ => Err(CartError::NotOpen),
        }
    }
}

impl Decide for ShoppingCart {
    type State = CartState;
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = CartError;

    fn initial_state(&self) -> CartState {
        CartState::Empty
    }

    fn evolve(&self, state: CartState, event: &CartEvent) -> CartState {
        match (state, event) {
            (CartState::Empty, CartEvent::Opened { cart_id, .. }) => CartState::Pending {
                cart_id: *cart_id,
                items: 0,
            },
            (CartState::Pending { cart_id, items }, CartEvent::ItemAdded { .. }) => {
                CartState::Pending { cart_id, items: items + 1 }
            }
            (CartState::Pending { cart_id, items }, CartEvent::ItemRemoved { .. }) => {
                CartState::Pending { cart_id, items: items.saturating_sub(1) }
            }
            (CartState::Pending { cart_id, .. }, CartEvent::Confirmed { .. })
            | (CartState::Pending { cart_id, .. }, CartEvent::Canceled { .. }) => {
                CartState::Closed { cart_id }
            }
            (state, _) => state,
        }
    }

    fn decide(
        &self,
        state: &CartState,
        command: &CartCommand,
    ) -> Result<Decision<CartEvent>, DispatchError<CartError>> {
        let event = match command {
            CartCommand::Open { cart_id, client_id, now } => {
                if *state != CartState::Empty {
                    return Err(CartError::AlreadyOpen.into());
                }
                CartEvent::Opened {
                    cart_id: *cart_id,
                    client_id: *client_id,
                    opened_at: *now,
                }
            }
            CartCommand::AddItem { product_id } => CartEvent::ItemAdded {
                cart_id: Self::open_cart(state)?,
                product_id: *product_id,
            },
            CartCommand::RemoveItem { product_id } => {
                if let CartState::Pending { items: 0, .. } = state {
                    return Err(CartError::NothingToRemove.into());
                }
                CartEvent::ItemRemoved {
                    cart_id: Self::open_cart(state)?,
                    product_id: *product_id,
                }
            }
            CartCommand::Confirm { now } => CartEvent::Confirmed {
                cart_id: Self::open_cart(state)?,
                confirmed_at: *now,
            },
            CartCommand::Cancel { now } => CartEvent::Canceled {
                cart_id: Self::open_cart(state)?,
                canceled_at: *now,
            },
        };
        Ok(Decision::one(event))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!("=== Shopping Cart Example ===\n");

    let carts = create_factory(ShoppingCart);
    let cart_id = Uuid::now_v7();
    let client_id = Uuid::now_v7();
    let product_id = Uuid::now_v7();
    let now = Utc::now();

    // === Example 1: Dispatch ===
    println!("=== Example 1: Dispatch ===");

    let mut cart = carts.create_empty();
    println!("Initial state: {:?}", cart.get_state());

    cart.dispatch(&CartCommand::Open { cart_id, client_id, now })?;
    cart.dispatch(&CartCommand::AddItem { product_id })?;
    cart.dispatch(&CartCommand::AddItem { product_id })?;
    println!("State after open + 2 items: {:?}", cart.get_state());
    println!("Pending events: {}\n", cart.pending_events().len());

    // === Example 2: Flush ===
    println!("=== Example 2: Flush ===");

    let mut store = cart.flush();
    println!("Flushed {} events", store.len());
    for event in &store {
        println!("  {}", serde_json::to_string(event)?);
    }
    println!("Pending after flush: {}\n", cart.pending_events().len());

    // === Example 3: Rejection ===
    println!("=== Example 3: Rejection ===");

    match cart.dispatch(&CartCommand::Open { cart_id, client_id, now }) {
        Err(err) => println!("Second open rejected: {err}"),
        Ok(n) => println!("Unexpectedly produced {n} events"),
    }
    println!("State unchanged: {:?}\n", cart.get_state());

    // === Example 4: Rehydrate and confirm ===
    println!("=== Example 4: Rehydrate ===");

    let mut restored = carts.create(store.clone());
    println!("Rehydrated state: {:?}", restored.get_state());

    restored.dispatch(&CartCommand::RemoveItem { product_id })?;
    restored.dispatch(&CartCommand::Confirm { now: now + Duration::minutes(5) })?;
    store.extend(restored.flush());
    println!("Final state: {:?}", restored.get_state());
    println!("History length: {}", restored.all_events().len());

    let replayed = carts.create(store);
    assert_eq!(replayed.get_state(), restored.get_state());
    println!("Replay matches live state: {:?}", replayed.get_state());

    Ok(())
}
