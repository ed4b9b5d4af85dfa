// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse and validate command-line arguments
// 2. Load the URLs (flag, file or stdin)
// 3. Hand them to the worker pool together with an HTTP checker
// 4. Print each result as it arrives, then a summary
// 5. Exit with proper code (0 = all good, 1 = failures, 2 = error, 130 = Ctrl+C)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Arc<dyn Trait>: Share one checker between all workers
// - match: Turn every outcome into an exit code
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker;       // src/checker/ - checking a single URL
mod cli;           // src/cli.rs - command-line parsing and validation
mod input;         // src/input/ - loading the URL list
mod logging;       // src/logging.rs - tracing setup
mod output;        // src/output/ - progress lines, summary, JSON
mod worker;        // src/worker/ - the bounded worker pool

use anyhow::{Context, Result};
use checker::{Checker, HttpChecker};
use clap::Parser;
use cli::{Cli, Config};
use output::{Summary, Writer};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use worker::{CancelSignal, RunError, WorkerPool};

const EXIT_OK: i32 = 0;
const EXIT_FAILED: i32 = 1;
const EXIT_ERROR: i32 = 2;
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let config = Config::try_from(cli)?;

    let urls = config.source.load(config.max_urls)?;
    if urls.is_empty() {
        anyhow::bail!("no URLs found to check");
    }

    let checker = Arc::new(HttpChecker::new(config.timeout)?);
    let cancel = shutdown_signal(config.deadline);

    check_urls(&config, &cancel, checker, urls).await
}

// Cancelled by Ctrl+C / SIGTERM, and by --deadline if one was given
fn shutdown_signal(deadline: Option<Duration>) -> CancelSignal {
    let token = CancellationToken::new();
    let handler_token = token.clone();

    tokio::spawn(async move {
        wait_for_interrupt().await;
        eprintln!("\nReceived interrupt signal, shutting down gracefully...");
        handler_token.cancel();
    });

    let signal = CancelSignal::from_token(token);
    match deadline {
        Some(deadline) => signal.with_timeout(deadline),
        None => signal,
    }
}

async fn wait_for_interrupt() {
    // If a handler can't be installed, that source simply never fires
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

async fn check_urls(
    config: &Config,
    cancel: &CancelSignal,
    checker: Arc<dyn Checker>,
    urls: Vec<String>,
) -> Result<i32> {
    let pool = WorkerPool::new(config.workers);
    let writer = Writer::new(config.color && !config.quiet);
    let total = urls.len();

    // JSON goes out in one piece at the end, so no progress lines with it
    let show_all = !config.quiet && !config.json;
    let show_failures = config.quiet && !config.json;

    if show_all {
        println!(
            "Checking {} URLs with {} workers (timeout: {:?})...",
            total,
            pool.effective_workers(),
            config.timeout
        );
    }
    tracing::info!(total, workers = pool.effective_workers(), "starting check");

    let started = Instant::now();
    let mut results = Vec::with_capacity(total);

    let outcome = pool
        .run(cancel, checker, urls, |current, total, result| {
            if show_all || (show_failures && !result.is_success()) {
                writer.write_progress(current, total, result);
            }
            results.push(result.clone());
        })
        .await;

    match outcome {
        Ok(()) => {}
        Err(RunError::Cancelled) => {
            eprintln!("Operation cancelled by user");
            return Ok(EXIT_INTERRUPTED);
        }
        Err(e @ RunError::DeadlineExceeded) => {
            return Err(e).with_context(|| {
                format!("execution failed after {} of {} URLs", results.len(), total)
            });
        }
    }

    let summary = Summary::from_results(&results, started.elapsed());
    if config.json {
        writer.write_json(&results)?;
    } else if !config.quiet {
        writer.write_summary(&summary);
    }

    Ok(exit_code(&summary))
}

fn exit_code(summary: &Summary) -> i32 {
    if summary.all_succeeded() {
        EXIT_OK
    } else {
        EXIT_FAILED
    }
}
