// src/worker/mod.rs
// =============================================================================
// The concurrent core of urlcheck.
//
// Submodules:
// - pool: WorkerPool, fans URLs out to N workers and results back in
// - cancel: CancelSignal and RunError, how a run is stopped early
// =============================================================================

mod cancel;
mod pool;

pub use cancel::{CancelSignal, RunError};
pub use pool::WorkerPool;
