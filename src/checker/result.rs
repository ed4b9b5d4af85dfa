// src/checker/result.rs
// =============================================================================
// The outcome of checking one URL, and the ways a check can fail.
//
// A failed check is NOT a Rust error here: it's a value stored inside the
// CheckResult. The worker pool never aborts because a URL is broken - it just
// hands the result over to whoever is printing them.
//
// Rust concepts:
// - thiserror: derive std::error::Error + Display from attributes
// - serde: turn results into JSON for the --json flag
// =============================================================================

use serde::{Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;

// The error taxonomy for a single check
//
// Every variant keeps the URL so the message is useful on its own,
// e.g. "DNS lookup failed for https://nope.invalid"
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckError {
    /// The request did not finish within the configured timeout
    #[error("timeout for {url}")]
    Timeout { url: String },
    /// The hostname could not be resolved
    #[error("DNS lookup failed for {url}")]
    DnsFailed { url: String },
    /// The host actively refused the TCP connection
    #[error("connection refused for {url}")]
    ConnectionRefused { url: String },
    /// Anything else that went wrong on the way to a response
    #[error("network error for {url}")]
    Network { url: String },
}

// Represents the result of checking a single URL
//
// status_code is 0 when the check never got an HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    /// The URL that was checked
    pub url: String,
    /// HTTP status code, or 0 if there was no response
    pub status_code: u16,
    /// How long the check took
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    /// Why the check failed, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckError>,
}

impl CheckResult {
    /// A result that got an HTTP response
    pub fn response(url: impl Into<String>, status_code: u16, duration: Duration) -> Self {
        Self {
            url: url.into(),
            status_code,
            duration,
            error: None,
        }
    }

    /// A result that never got a response
    pub fn failure(url: impl Into<String>, error: CheckError, duration: Duration) -> Self {
        Self {
            url: url.into(),
            status_code: 0,
            duration,
            error: Some(error),
        }
    }

    /// Only 2xx responses without an error count as success
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status_code)
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
