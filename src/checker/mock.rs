// src/checker/mock.rs
// =============================================================================
// Deterministic checkers for testing the worker pool without a network.
//
// MockChecker always answers 200 with a fixed 100ms duration, optionally
// after sleeping. CountingChecker additionally records how many checks were
// running at the same time.
// =============================================================================

use super::{CheckResult, Checker};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// The duration every mock result reports
pub const MOCK_DURATION: Duration = Duration::from_millis(100);

#[derive(Debug, Default, Clone)]
pub struct MockChecker {
    /// Artificial delay before answering
    pub delay: Duration,
}

impl MockChecker {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Checker for MockChecker {
    async fn check(&self, url: &str) -> CheckResult {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        CheckResult::response(url, 200, MOCK_DURATION)
    }
}

// Tracks in-flight checks with atomics, since many workers touch it at once
#[derive(Debug, Default)]
pub struct CountingChecker {
    pub delay: Duration,
    active: AtomicUsize,
    max_active: AtomicUsize,
    calls: AtomicUsize,
}

impl CountingChecker {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Highest number of checks that were running simultaneously
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    /// Total number of checks started
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Checker for CountingChecker {
    async fn check(&self, url: &str) -> CheckResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        self.active.fetch_sub(1, Ordering::SeqCst);
        CheckResult::response(url, 200, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mock_result(result: &CheckResult, expected_url: &str) {
        assert_eq!(result.url, expected_url);
        assert_eq!(result.status_code, 200);
        assert_eq!(result.duration, MOCK_DURATION);
        assert!(result.error.is_none());
    }

    #[tokio::test]
    async fn test_mock_checker() {
        let result = MockChecker::default().check("https://example.com").await;
        assert_mock_result(&result, "https://example.com");
    }

    #[tokio::test]
    async fn test_mock_checker_empty_url() {
        let result = MockChecker::default().check("").await;
        assert_mock_result(&result, "");
    }

    #[tokio::test]
    async fn test_mock_checker_waits_for_delay() {
        let start = std::time::Instant::now();
        let result = MockChecker::with_delay(Duration::from_millis(50))
            .check("https://example.com")
            .await;

        assert!(start.elapsed() >= Duration::from_millis(50));
        // The reported duration stays fixed regardless of the delay
        assert_mock_result(&result, "https://example.com");
    }
}
