// src/output/writer.rs
// =============================================================================
// Turns results into what the user sees on stdout.
//
// Progress line per result:
//   [ 3/10] ✓ https://example.com (200, 120.5ms)
//   [ 4/10] ✗ https://nope.invalid (DNS lookup failed for https://nope.invalid)
//   [ 5/10] ! https://example.com/missing (404, 80.1ms)
//
// Colors are ANSI escape codes and are only used when asked for AND stdout is
// a real terminal (piping into a file or `grep` gets plain text).
// =============================================================================

use super::Summary;
use crate::checker::CheckResult;
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::time::Duration;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_RED: &str = "\x1b[31m";
const COLOR_GREEN: &str = "\x1b[32m";
const COLOR_YELLOW: &str = "\x1b[33m";

#[derive(Debug, Clone)]
pub struct Writer {
    color: bool,
}

impl Writer {
    /// `color` is a request; it's dropped when the terminal can't show it
    pub fn new(color: bool) -> Self {
        Self {
            color: color && color_supported(),
        }
    }

    pub fn write_progress(&self, current: usize, total: usize, result: &CheckResult) {
        println!("{}", self.format_progress(current, total, result));
    }

    pub fn format_progress(&self, current: usize, total: usize, result: &CheckResult) -> String {
        let marker = if result.error.is_some() {
            self.colorize("✗", COLOR_RED)
        } else if (200..300).contains(&result.status_code) {
            self.colorize("✓", COLOR_GREEN)
        } else {
            self.colorize("!", COLOR_YELLOW)
        };

        let details = match &result.error {
            Some(error) => format!("({})", error),
            None => format!("({}, {:?})", result.status_code, result.duration),
        };

        // Pad the counter so the columns line up: [ 3/10], [10/10]
        let width = total.to_string().len();
        format!(
            "[{:>width$}/{}] {} {} {}",
            current,
            total,
            marker,
            result.url,
            details,
            width = width
        )
    }

    pub fn write_summary(&self, summary: &Summary) {
        println!();
        println!("{}", self.format_summary(summary));
    }

    pub fn format_summary(&self, summary: &Summary) -> String {
        let success = self.colorize(&format!("{} successful", summary.success), COLOR_GREEN);
        let failed = self.colorize(&format!("{} failed", summary.failed), COLOR_RED);
        // Round to the nearest millisecond
        let elapsed = summary.duration.saturating_add(Duration::from_micros(500));
        let elapsed = Duration::from_millis(elapsed.as_millis() as u64);

        format!(
            "Summary: {}, {}, {:.1}% success rate\nTotal: {} URLs checked in {:?}",
            success,
            failed,
            summary.success_rate(),
            summary.total,
            elapsed
        )
    }

    // Prints every result as one pretty JSON array
    pub fn write_json(&self, results: &[CheckResult]) -> Result<()> {
        let json = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
        println!("{}", json);
        Ok(())
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, COLOR_RESET)
        } else {
            text.to_string()
        }
    }
}

fn color_supported() -> bool {
    let term_set = std::env::var("TERM").map(|t| !t.is_empty()).unwrap_or(false);
    term_set && std::io::stdout().is_terminal()
}
