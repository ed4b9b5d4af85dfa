// src/checker/mod.rs
// =============================================================================
// This module contains the "check one URL" capability.
//
// Submodules:
// - result: The CheckResult record and the CheckError taxonomy
// - http: The real checker, one GET request per URL
// - mock: Deterministic checkers used by the tests
//
// The worker pool only knows about the Checker trait. Which implementation
// it gets is decided once, by whoever builds the pool's inputs.
// =============================================================================

mod http;
#[cfg(test)]
pub mod mock;
mod result;

use async_trait::async_trait;

pub use http::{HttpChecker, DEFAULT_TIMEOUT};
pub use result::{CheckError, CheckResult};

/// Checks a single URL.
///
/// Implementations must always produce a [`CheckResult`] (failures go into
/// its `error` field) and must bound their own running time: the worker pool
/// never interrupts a check that has started.
///
/// The pool calls `check` from several workers at once, hence `Send + Sync`.
/// Any shared counters inside an implementation need atomics or a mutex.
#[async_trait]
pub trait Checker: Send + Sync {
    async fn check(&self, url: &str) -> CheckResult;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why #[async_trait]?
//    - The pool stores the checker as Arc<dyn Checker>
//    - A trait object needs a known return type, and an async fn returns an
//      anonymous future. async_trait boxes that future for us.
//
// 2. Why is mock behind #[cfg(test)]?
//    - It's only compiled for `cargo test`, so the release binary never
//      carries fake checkers around
// -----------------------------------------------------------------------------
