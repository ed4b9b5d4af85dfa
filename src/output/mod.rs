// src/output/mod.rs
// =============================================================================
// Everything that prints results.
//
// Submodules:
// - writer: progress lines, summary and JSON
// - summary: counts successes and failures for the final report
// =============================================================================

mod summary;
mod writer;

pub use summary::Summary;
pub use writer::Writer;
