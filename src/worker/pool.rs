// src/worker/pool.rs
// =============================================================================
// The bounded worker pool that checks a list of URLs.
//
// How one run works:
// 1. Every URL goes into a closed queue sized to the URL count
// 2. N worker tasks pull URLs from the queue and call the Checker
// 3. Each CheckResult is sent on a completion channel
// 4. A finalizer task waits for all workers, then closes that channel
// 5. The calling task (the coordinator) receives results one at a time and
//    calls the progress callback, until the channel closes or the
//    CancelSignal fires
//
// Rust concepts:
// - tokio::spawn: Run workers concurrently on the runtime
// - async_channel: A queue where every worker owns its own Receiver
// - tokio::select!: Wait for whichever of two things happens first
// - FnMut: A callback that is allowed to mutate what it captured
// =============================================================================

use super::{CancelSignal, RunError};
use crate::checker::{CheckResult, Checker};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Checks URLs with a fixed number of concurrent workers.
///
/// The pool holds no state between runs apart from its worker count.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    max_workers: usize,
}

impl WorkerPool {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    /// The number of workers a run actually starts (never zero)
    pub fn effective_workers(&self) -> usize {
        self.max_workers.max(1)
    }

    /// Checks every URL and reports each result through `on_progress`.
    ///
    /// `on_progress(completed, total, &result)` is called once per result, in
    /// the order results arrive, never concurrently, from the task that
    /// awaits `run`. Arrival order usually differs from the order of `urls`.
    ///
    /// Returns `Ok(())` once every URL has been reported, or the
    /// [`RunError`] of `cancel` as soon as it fires.
    ///
    /// Cancellation does not preempt checks that are already running. Those
    /// workers are abandoned: they keep going in the background until their
    /// current check returns, its result is discarded, and they stop without
    /// picking up another URL. `run` does not wait for them, so connections
    /// they hold may outlive the call.
    pub async fn run<F>(
        &self,
        cancel: &CancelSignal,
        checker: Arc<dyn Checker>,
        urls: Vec<String>,
        mut on_progress: F,
    ) -> Result<(), RunError>
    where
        F: FnMut(usize, usize, &CheckResult),
    {
        let total = urls.len();
        if total == 0 {
            debug!("no URLs to check");
            return Ok(());
        }

        let workers = self.effective_workers();
        debug!(workers, total, "starting worker pool");

        // Every URL is known up front, so the whole list fits in the queue and
        // closing it right away lets workers exit once it's drained.
        let (task_tx, task_rx) = async_channel::bounded::<String>(total);
        for url in urls {
            let queued = task_tx.try_send(url).is_ok();
            debug_assert!(queued, "task queue sized to the URL count");
        }
        task_tx.close();

        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<CheckResult>();

        let handles: Vec<JoinHandle<()>> = (0..workers)
            .map(|id| {
                let task_rx = task_rx.clone();
                let result_tx = result_tx.clone();
                let checker = Arc::clone(&checker);
                tokio::spawn(async move {
                    while let Ok(url) = task_rx.recv().await {
                        let result = checker.check(&url).await;
                        if result_tx.send(result).is_err() {
                            debug!(worker = id, url = %url, "run abandoned, dropping result");
                            break;
                        }
                    }
                    debug!(worker = id, "worker finished");
                })
            })
            .collect();
        drop(task_rx);

        // The finalizer owns the last sender. Once it drops it, recv() below
        // returns None and the run is complete.
        tokio::spawn(async move {
            for joined in futures::future::join_all(handles).await {
                if let Err(e) = joined {
                    warn!(error = %e, "worker task failed");
                }
            }
            drop(result_tx);
            debug!("all workers finished, closing result channel");
        });

        let mut completed = 0;
        loop {
            tokio::select! {
                biased;
                reason = cancel.fired() => {
                    debug!(completed, total, %reason, "run stopped before all results arrived");
                    return Err(reason);
                }
                received = result_rx.recv() => match received {
                    Some(result) => {
                        completed += 1;
                        on_progress(completed, total, &result);
                    }
                    None => {
                        debug!(completed, total, "all results delivered");
                        return Ok(());
                    }
                },
            }
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does every worker clone the receiver?
//    - async_channel receivers are multi-consumer: each recv() hands a URL
//      to exactly one worker, so no URL is checked twice
//    - No Mutex around the queue is needed
//
// 2. Why is the callback not Send?
//    - It runs on the coordinator only, it never crosses into a worker
//    - That's also why two callbacks can never run at the same time
//
// 3. What does `biased;` do in select!?
//    - Branches are polled top to bottom instead of randomly
//    - A fired signal is noticed even if results keep streaming in
// -----------------------------------------------------------------------------
