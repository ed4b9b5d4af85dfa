// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two steps:
// 1. clap parses the raw flags into `Cli`
// 2. `Config::try_from(cli)` checks the combination makes sense (exactly one
//    URL source, sane worker count, non-zero timeout...) and produces the
//    validated settings the rest of the program uses
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct
// - TryFrom: a conversion that can fail
// - thiserror: one error enum for everything validation can reject
// =============================================================================

use crate::checker::DEFAULT_TIMEOUT;
use crate::input::{parse_url_list, UrlSource, DEFAULT_MAX_URLS};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Workers used when --workers isn't given
pub const DEFAULT_WORKERS: usize = 5;

/// Upper bound accepted for --workers
pub const MAX_WORKERS: usize = 1000;

// The raw command line
#[derive(Parser, Debug)]
#[command(
    name = "urlcheck",
    version,
    about = "Fast concurrent URL checker",
    long_about = "urlcheck sends a GET request to every URL it's given, a few at a time, \
                  and reports the status code and response time of each one.",
    after_help = "Exit codes:\n  \
                  0    All URLs successful\n  \
                  1    Some URLs failed\n  \
                  2    Invalid usage or the run could not complete\n  \
                  130  Interrupted by user (Ctrl+C)\n\n\
                  Examples:\n  \
                  urlcheck --urls \"https://google.com,https://github.com\"\n  \
                  urlcheck --file urls.txt --workers 20\n  \
                  cat urls.txt | urlcheck --stdin --timeout 10s"
)]
pub struct Cli {
    /// File containing URLs (one per line, '#' starts a comment)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Comma-separated list of URLs
    #[arg(long, value_name = "LIST")]
    pub urls: Option<String>,

    /// Read URLs from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Number of concurrent workers
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Request timeout per URL, e.g. 500ms, 5s, 1m
    #[arg(long, default_value = "5s", value_parser = parse_duration)]
    pub timeout: Duration,

    /// Give up on the whole run after this long, e.g. 30s
    #[arg(long, value_parser = parse_duration)]
    pub deadline: Option<Duration>,

    /// Maximum number of URLs to process
    #[arg(long, default_value_t = DEFAULT_MAX_URLS)]
    pub max_urls: usize,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Quiet mode - show failed URLs only
    #[arg(long, short)]
    pub quiet: bool,

    /// Print results as JSON instead of progress lines
    #[arg(long)]
    pub json: bool,

    /// Log debug details to stderr
    #[arg(long, short)]
    pub verbose: bool,
}

// Everything validation can reject
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no URL source specified. Use --file, --urls, or --stdin")]
    NoSource,
    #[error("specify only one URL source (--file, --urls, or --stdin)")]
    MultipleSources,
    #[error("--workers must be between 1 and 1000, got {0}")]
    Workers(usize),
    #[error("--timeout must be greater than zero")]
    Timeout,
    #[error("--deadline must be greater than zero")]
    Deadline,
    #[error("--max-urls must be greater than zero")]
    MaxUrls,
}

// Validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: UrlSource,
    pub workers: usize,
    pub timeout: Duration,
    pub deadline: Option<Duration>,
    pub max_urls: usize,
    pub color: bool,
    pub quiet: bool,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: UrlSource::Stdin,
            workers: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            deadline: None,
            max_urls: DEFAULT_MAX_URLS,
            color: true,
            quiet: false,
            json: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::Workers(self.workers));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::Timeout);
        }
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::Deadline);
        }
        if self.max_urls == 0 {
            return Err(ConfigError::MaxUrls);
        }
        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let mut sources = Vec::new();
        if let Some(path) = cli.file {
            sources.push(UrlSource::File(path));
        }
        if let Some(list) = cli.urls {
            sources.push(UrlSource::List(parse_url_list(&list)));
        }
        if cli.stdin {
            sources.push(UrlSource::Stdin);
        }

        let source = match sources.len() {
            0 => return Err(ConfigError::NoSource),
            1 => sources.remove(0),
            _ => return Err(ConfigError::MultipleSources),
        };

        let config = Config {
            source,
            workers: cli.workers,
            timeout: cli.timeout,
            deadline: cli.deadline,
            max_urls: cli.max_urls,
            color: !cli.no_color,
            quiet: cli.quiet,
            json: cli.json,
        };
        config.validate()?;
        Ok(config)
    }
}

// Parses "500ms", "5s", "1.5m", "2h" into a Duration
//
// Used as a clap value_parser, so errors are plain Strings.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();

    // "ms" has to be tried before "m" and "s"
    let (number, unit_millis) = if let Some(n) = input.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = input.strip_suffix('s') {
        (n, 1_000.0)
    } else if let Some(n) = input.strip_suffix('m') {
        (n, 60_000.0)
    } else if let Some(n) = input.strip_suffix('h') {
        (n, 3_600_000.0)
    } else {
        return Err(format!(
            "invalid duration '{}': expected a unit (ms, s, m, h), e.g. 5s",
            input
        ));
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{}'", input))?;

    Duration::try_from_secs_f64(value * unit_millis / 1_000.0)
        .map_err(|_| format!("invalid duration '{}': must be a non-negative number", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(args: &[&str]) -> Result<Config, ConfigError> {
        let mut argv = vec!["urlcheck"];
        argv.extend_from_slice(args);
        Config::try_from(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("500ms"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_duration("5s"), Ok(Duration::from_secs(5)));
        assert_eq!(parse_duration("1.5s"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("1m"), Ok(Duration::from_secs(60)));
        assert_eq!(parse_duration("2h"), Ok(Duration::from_secs(7200)));
        assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("5").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&["--urls", "https://a.com, https://b.com"]).unwrap();
        assert_eq!(
            config,
            Config {
                source: UrlSource::List(vec!["https://a.com".into(), "https://b.com".into()]),
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_all_flags() {
        let config = config_from(&[
            "--file", "urls.txt", "--workers", "20", "--timeout", "10s", "--deadline", "1m",
            "--max-urls", "50", "--no-color", "--quiet", "--json",
        ])
        .unwrap();

        assert_eq!(config.source, UrlSource::File(PathBuf::from("urls.txt")));
        assert_eq!(config.workers, 20);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.deadline, Some(Duration::from_secs(60)));
        assert_eq!(config.max_urls, 50);
        assert!(!config.color);
        assert!(config.quiet);
        assert!(config.json);
    }

    #[test]
    fn test_exactly_one_source() {
        assert_eq!(config_from(&[]), Err(ConfigError::NoSource));
        assert_eq!(
            config_from(&["--stdin", "--urls", "https://a.com"]),
            Err(ConfigError::MultipleSources)
        );
        assert_eq!(config_from(&["--stdin"]).unwrap().source, UrlSource::Stdin);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert_eq!(config_from(&["--stdin", "--workers", "0"]), Err(ConfigError::Workers(0)));
        assert_eq!(
            config_from(&["--stdin", "--workers", "1001"]),
            Err(ConfigError::Workers(1001))
        );
        assert_eq!(config_from(&["--stdin", "--timeout", "0s"]), Err(ConfigError::Timeout));
        assert_eq!(config_from(&["--stdin", "--deadline", "0ms"]), Err(ConfigError::Deadline));
        assert_eq!(config_from(&["--stdin", "--max-urls", "0"]), Err(ConfigError::MaxUrls));
    }

    #[test]
    fn test_bad_duration_is_a_parse_error() {
        assert!(Cli::try_parse_from(["urlcheck", "--stdin", "--timeout", "soon"]).is_err());
    }
}
