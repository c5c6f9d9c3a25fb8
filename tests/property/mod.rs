// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! This module contains property-based tests using proptest to verify
//! the event sourcing laws of the aggregate kernel.

mod kernel_laws;
