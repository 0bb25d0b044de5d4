//! Test support shared by the integration suites.
//!
//! Compiles the crate's own in-memory store so unit and integration tests run
//! against one implementation.

use redis_viewer::{model, store};

#[allow(dead_code)]
#[path = "../../src/test_harness.rs"]
pub mod test_harness;
