// src/checker/http.rs
// =============================================================================
// The live check: one HTTP GET per URL.
//
// Key functionality:
// - Reuses one reqwest Client for every URL (connection pooling)
// - Enforces a per-request timeout, so a check always returns
// - Measures how long each request took
// - Classifies failures into timeout / DNS / refused / other network error
//
// Rust concepts:
// - async/await: For network I/O
// - Error source chains: Walking std::error::Error::source() to find the
//   real cause hidden under reqwest's wrapper error
// =============================================================================

use super::{CheckError, CheckResult, Checker};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::{Duration, Instant};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

// Checks URLs by issuing a real GET request
//
// Cloning an HttpChecker is cheap: reqwest::Client is reference counted.
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
    timeout: Duration,
}

impl HttpChecker {
    /// Builds a checker with its own client and the given per-request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, timeout))
    }

    /// Uses a caller-provided client. The timeout is still applied per request.
    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Checker for HttpChecker {
    async fn check(&self, url: &str) -> CheckResult {
        let start = Instant::now();
        let response = self.client.get(url).timeout(self.timeout).send().await;
        let duration = start.elapsed();

        match response {
            // We only care about the status line, the body is dropped unread
            Ok(response) => CheckResult::response(url, response.status().as_u16(), duration),
            Err(e) => {
                let error = classify_error(url, &e);
                tracing::debug!(url, error = %e, kind = ?error, "check failed");
                CheckResult::failure(url, error, duration)
            }
        }
    }
}

// Maps a reqwest error onto our error taxonomy
//
// reqwest wraps hyper which wraps the OS error, so the interesting part is
// usually a few levels down the source() chain.
fn classify_error(url: &str, error: &reqwest::Error) -> CheckError {
    let url = url.to_string();

    if error.is_timeout() {
        return CheckError::Timeout { url };
    }

    if error.is_connect() {
        if has_io_error_kind(error, std::io::ErrorKind::ConnectionRefused) {
            return CheckError::ConnectionRefused { url };
        }
        if has_io_error_kind(error, std::io::ErrorKind::TimedOut) {
            return CheckError::Timeout { url };
        }
        if is_dns_error(error) {
            return CheckError::DnsFailed { url };
        }
    }

    CheckError::Network { url }
}

// Walks the source chain looking for a std::io::Error of the given kind
fn has_io_error_kind(error: &reqwest::Error, kind: std::io::ErrorKind) -> bool {
    let mut source = error.source();
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            if io_err.kind() == kind {
                return true;
            }
        }
        source = err.source();
    }
    false
}

// hyper reports resolver failures as "dns error: ..." somewhere in the chain
fn is_dns_error(error: &(dyn StdError + 'static)) -> bool {
    let mut source = Some(error);
    while let Some(err) = source {
        let message = err.to_string().to_lowercase();
        if message.contains("dns error") || message.contains("failed to lookup address") {
            return true;
        }
        source = err.source();
    }
    false
}
