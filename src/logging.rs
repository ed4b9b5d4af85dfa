// src/logging.rs
// =============================================================================
// Diagnostic logging to stderr with `tracing`.
//
// Logs are for debugging urlcheck itself; the per-URL report goes to stdout
// through output::Writer. RUST_LOG wins over --verbose when it's set.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_filter = if verbose { "warn,urlcheck=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
