//! Integration test utilities for the invite engine
//!
//! Drives the full Axum application in-process over the in-memory store, so
//! the end-to-end scenarios need no external services.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
