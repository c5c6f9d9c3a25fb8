// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Aggregate Kernel
//!
//! These tests prove properties that must hold for every event history and
//! every command sequence run through the shopping cart decider:
//! - State is a pure fold over history
//! - Every prefix of history rehydrates to the state it had when live
//! - Dispatch is exactly decide-then-fold
//! - Unknown command tags change nothing
//! - Flush is idempotent
//! - History and pending partition the event log

use chrono::Duration;
use proptest::prelude::*;
use serde_json::json;

use cim_decider::{create_factory, Command, Decide, Event};

use crate::fixtures::*;

// ============================================================================
// Strategies
// ============================================================================

/// Any cart event, including one the reducer does not know
fn cart_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(cart_opened()),
        Just(item_added()),
        Just(Event::new(ITEM_REMOVED, json!({ "shoppingCartId": CART_ID }))),
        (0i64..1_000).prop_map(|m| cart_confirmed(fixed_timestamp() + Duration::minutes(m))),
        Just(Event::new(CANCELED, json!({ "shoppingCartId": CART_ID }))),
        Just(Event::new("ShoppingCartRenamed", json!({}))),
    ]
}

fn event_history() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec(cart_event(), 0..40)
}

/// Lowercase tags never collide with the cart's PascalCase tags
fn unknown_command() -> impl Strategy<Value = Command> {
    "[a-z]{1,12}".prop_map(|tag| Command::new(tag, json!({ "shoppingCartId": CART_ID })))
}

/// Any cart command, including unregistered ones
fn cart_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(open_cart()),
        Just(add_item()),
        Just(remove_item()),
        (0i64..1_000).prop_map(|m| confirm_cart(fixed_timestamp() + Duration::minutes(m))),
        (0i64..1_000).prop_map(|m| cancel_cart(fixed_timestamp() + Duration::minutes(m))),
        unknown_command(),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Dispatch(Command),
    Flush,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => cart_command().prop_map(Op::Dispatch),
        1 => Just(Op::Flush),
    ]
}

fn op_sequence() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 0..40)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Folding is deterministic
    ///
    /// Element-wise equal histories fold to equal states.
    #[test]
    fn prop_fold_is_pure(events in event_history()) {
        let decider = shopping_cart();
        let copy = events.clone();

        prop_assert_eq!(decider.fold(&events), decider.fold(&copy));
    }

    /// Property: Rehydration equals fold
    ///
    /// A freshly created aggregate holds exactly the folded state and the
    /// history as committed events.
    #[test]
    fn prop_rehydration_equals_fold(events in event_history()) {
        let decider = shopping_cart();
        let carts = create_factory(decider.clone());
        let cart = carts.create(events.clone());

        prop_assert_eq!(cart.get_state(), &decider.fold(&events));
        prop_assert_eq!(cart.committed_events(), events.as_slice());
        prop_assert!(cart.pending_events().is_empty());
    }

    /// Property: Prefix consistency
    ///
    /// After every dispatch, rehydrating from the events produced so far
    /// yields the live state at that moment.
    #[test]
    fn prop_prefix_consistency(commands in prop::collection::vec(cart_command(), 0..30)) {
        let carts = create_factory(shopping_cart());
        let mut cart = carts.create_empty();
        let mut checkpoints = Vec::new();

        for command in &commands {
            cart.dispatch(command).unwrap();
            checkpoints.push((cart.version() as usize, cart.get_state().clone()));
        }

        let history = cart.all_events();
        for (len, state) in checkpoints {
            let replayed = carts.create(history[..len].to_vec());
            prop_assert_eq!(replayed.get_state(), &state);
        }
    }

    /// Property: Dispatch is decide-then-fold
    ///
    /// The state after dispatch equals folding the decided events one at a
    /// time from the prior state, and exactly those events become pending.
    #[test]
    fn prop_dispatch_equals_decide_then_fold(history in event_history(), command in cart_command()) {
        let decider = shopping_cart();
        let carts = create_factory(decider.clone());
        let mut cart = carts.create(history);

        let before = cart.get_state().clone();
        let decision = decider.decide(&before, &command).unwrap();
        let expected_events = decision.events().to_vec();
        let expected_state = decider.fold_from(before, decision.events());

        let produced = cart.dispatch(&command).unwrap();

        prop_assert_eq!(produced, expected_events.len());
        prop_assert_eq!(cart.get_state(), &expected_state);
        prop_assert_eq!(cart.pending_events(), expected_events);
    }

    /// Property: Unknown command tags are no-ops
    #[test]
    fn prop_unknown_command_is_noop(
        history in event_history(),
        warmup in prop::collection::vec(cart_command(), 0..5),
        command in unknown_command(),
    ) {
        let carts = create_factory(shopping_cart());
        let mut cart = carts.create(history);
        for c in &warmup {
            cart.dispatch(c).unwrap();
        }

        let state = cart.get_state().clone();
        let all = cart.all_events();
        let pending = cart.pending_events();

        prop_assert_eq!(cart.dispatch(&command).unwrap(), 0);
        prop_assert_eq!(cart.get_state(), &state);
        prop_assert_eq!(cart.all_events(), all);
        prop_assert_eq!(cart.pending_events(), pending);
    }

    /// Property: Flush is idempotent
    ///
    /// A flush with nothing pending returns nothing and leaves history alone.
    #[test]
    fn prop_flush_is_idempotent(ops in op_sequence()) {
        let carts = create_factory(shopping_cart());
        let mut cart = carts.create_empty();
        for op in ops {
            match op {
                Op::Dispatch(command) => { cart.dispatch(&command).unwrap(); }
                Op::Flush => { cart.flush(); }
            }
        }

        let pending = cart.pending_events();
        prop_assert_eq!(cart.flush(), pending);

        let all = cart.all_events();
        prop_assert!(cart.flush().is_empty());
        prop_assert_eq!(cart.all_events(), all);
    }

    /// Property: History/pending partition
    ///
    /// At every step the log is committed ++ pending with nothing lost,
    /// duplicated, or reordered, and state is the fold of that log.
    #[test]
    fn prop_history_pending_partition(history in event_history(), ops in op_sequence()) {
        let decider = shopping_cart();
        let carts = create_factory(decider.clone());
        let mut cart = carts.create(history.clone());

        let mut committed = history;
        let mut pending: Vec<Event> = Vec::new();

        for op in ops {
            match op {
                Op::Dispatch(command) => {
                    let decision = decider.decide(cart.get_state(), &command).unwrap();
                    pending.extend(decision.into_events());
                    cart.dispatch(&command).unwrap();
                }
                Op::Flush => {
                    let flushed = cart.flush();
                    prop_assert_eq!(&flushed, &pending);
                    committed.append(&mut pending);
                }
            }

            let mut expected = committed.clone();
            expected.extend(pending.iter().cloned());

            prop_assert_eq!(cart.committed_events(), committed.as_slice());
            prop_assert_eq!(cart.pending_events(), pending.clone());
            prop_assert_eq!(cart.all_events(), expected.clone());
            prop_assert_eq!(cart.get_state(), &decider.fold(&expected));
        }
    }
}
