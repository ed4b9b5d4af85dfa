// src/worker/cancel.rs
// =============================================================================
// The signal that tells a running pool to give up.
//
// Two triggers, whichever comes first:
// - someone calls cancel() (Ctrl-C handler, a test, a parent task)
// - an optional deadline passes
//
// Only the pool's coordinating loop listens to this signal. Checks that are
// already running are NOT interrupted.
// =============================================================================

use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a run stopped before every result was delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    /// cancel() was called on the signal
    #[error("operation cancelled")]
    Cancelled,
    /// The signal's deadline passed
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

// Clones share the same token, so cancelling any clone cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CancelSignal {
    /// A signal that only fires when cancel() is called
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing token, e.g. one also handed to a Ctrl-C handler
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Also fire once `timeout` has elapsed from now
    ///
    /// A timeout too large to represent means no deadline at all.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Also fire at `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Resolves when the signal fires, telling which trigger won.
    ///
    /// An explicit cancel wins a tie with the deadline.
    pub async fn fired(&self) -> RunError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => RunError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => RunError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                RunError::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_fires_cancelled() {
        let signal = CancelSignal::new();
        let clone = signal.clone();
        clone.cancel();

        assert_eq!(signal.fired().await, RunError::Cancelled);
    }

    #[tokio::test]
    async fn test_deadline_fires_deadline_exceeded() {
        let start = std::time::Instant::now();
        let signal = CancelSignal::new().with_timeout(Duration::from_millis(20));

        assert_eq!(signal.fired().await, RunError::DeadlineExceeded);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_cancel_beats_pending_deadline() {
        let signal = CancelSignal::new().with_timeout(Duration::from_secs(60));
        signal.cancel();

        let fired = tokio::time::timeout(Duration::from_secs(1), signal.fired()).await;
        assert_eq!(fired, Ok(RunError::Cancelled));
    }

    #[tokio::test]
    async fn test_unfired_signal_stays_pending() {
        let signal = CancelSignal::new();
        let fired = tokio::time::timeout(Duration::from_millis(50), signal.fired()).await;
        assert!(fired.is_err());
    }

    #[tokio::test]
    async fn test_shared_token() {
        let token = CancellationToken::new();
        let signal = CancelSignal::from_token(token.clone());
        token.cancel();

        assert_eq!(signal.fired().await, RunError::Cancelled);
    }
}
