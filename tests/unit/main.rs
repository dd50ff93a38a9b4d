// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Unit tests for agent-install-operator.
//!
//! These tests run without a Kubernetes cluster and test individual
//! components in isolation.
//!
//! ```bash
//! # Run all unit tests
//! cargo test --test unit
//!
//! # Run with verbose output
//! cargo test --test unit -- --nocapture
//! ```

mod feature_support_tests;
mod hardware_tests;
mod webhook_tests;
