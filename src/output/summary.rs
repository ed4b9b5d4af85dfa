// src/output/summary.rs
// =============================================================================
// End-of-run statistics.
// =============================================================================

use crate::checker::CheckResult;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// Wall-clock time of the whole run
    pub duration: Duration,
}

impl Summary {
    // Success = no error and a 2xx status code
    pub fn from_results(results: &[CheckResult], duration: Duration) -> Self {
        let success = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            success,
            failed: results.len() - success,
            duration,
        }
    }

    /// Percentage of successful checks, 0 when nothing was checked
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.success as f64 / self.total as f64 * 100.0
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
