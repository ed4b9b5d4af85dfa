// src/input/source.rs
// =============================================================================
// Reads the list of URLs to check.
//
// Where URLs can come from:
// - A comma-separated list given on the command line
// - A file with one URL per line
// - Standard input, one URL per line
//
// Line rules (file and stdin):
// - Leading/trailing whitespace is trimmed
// - Empty lines and lines starting with '#' are skipped
// - Lines that are not valid UTF-8 are skipped with a warning
// - Reading stops once `max_urls` URLs have been collected
//
// This is plain synchronous I/O: it runs once, before any checking starts.
// =============================================================================

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

/// Default cap on the number of URLs read from any source
pub const DEFAULT_MAX_URLS: usize = 10_000;

// Where the URLs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    /// URLs already parsed from the command line
    List(Vec<String>),
    /// A file with one URL per line
    File(PathBuf),
    /// Standard input, one URL per line
    Stdin,
}

impl UrlSource {
    /// Reads every URL from this source, keeping at most `max_urls`
    pub fn load(&self, max_urls: usize) -> Result<Vec<String>> {
        match self {
            UrlSource::List(urls) => Ok(urls.iter().take(max_urls).cloned().collect()),
            UrlSource::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open file {:?}", path))?;
                read_urls(BufReader::new(file), max_urls)
                    .with_context(|| format!("Failed to read file {:?}", path))
            }
            UrlSource::Stdin => {
                read_urls(io::stdin().lock(), max_urls).context("Failed to read stdin")
            }
        }
    }
}

// Splits "a, b,,c" into ["a", "b", "c"]
pub fn parse_url_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}

// Reads one URL per line from any buffered reader
//
// Generic over BufRead so tests can feed it an in-memory Cursor.
// Splits on raw bytes: one badly encoded line must not lose the whole list.
fn read_urls<R: BufRead>(reader: R, limit: usize) -> io::Result<Vec<String>> {
    let mut urls = Vec::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        if urls.len() == limit {
            break;
        }
        let line = match String::from_utf8(line?) {
            Ok(line) => line,
            Err(_) => {
                tracing::warn!(line = index + 1, "skipping line that is not valid UTF-8");
                continue;
            }
        };
        if let Some(url) = process_line(&line) {
            urls.push(url.to_string());
        }
    }

    Ok(urls)
}

// Returns the URL on this line, or None for blank lines and comments
fn process_line(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_parse_url_list() {
        let urls = parse_url_list(" https://google.com ,https://github.com,, ,");
        assert_eq!(urls, vec!["https://google.com", "https://github.com"]);
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list(" , ,").is_empty());
    }

    #[test]
    fn test_process_line() {
        assert_eq!(process_line("  http://example.com \t"), Some("http://example.com"));
        assert_eq!(process_line(""), None);
        assert_eq!(process_line("   "), None);
        assert_eq!(process_line("# a comment"), None);
        assert_eq!(process_line("   # indented comment"), None);
    }

    #[test]
    fn test_read_urls_skips_comments_and_blanks() {
        let input = "http://example.com\n# comment\n\n  http://google.com  \n";
        let urls = read_urls(Cursor::new(input), 10).unwrap();
        assert_eq!(urls, vec!["http://example.com", "http://google.com"]);
    }

    #[test]
    fn test_read_urls_respects_limit() {
        let input = "a\n# not counted\nb\nc\nd\n";
        let urls = read_urls(Cursor::new(input), 2).unwrap();
        assert_eq!(urls, vec!["a", "b"]);
    }

    #[test]
    fn test_read_urls_skips_invalid_utf8_lines() {
        let input = &b"http://a.com\nhttp://caf\xe9.com\nhttp://b.com\n"[..];
        let urls = read_urls(Cursor::new(input), 10).unwrap();
        assert_eq!(urls, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_read_urls_handles_crlf_and_missing_final_newline() {
        let input = "http://a.com\r\nhttp://b.com";
        let urls = read_urls(Cursor::new(input), 10).unwrap();
        assert_eq!(urls, vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_list_source_respects_limit() {
        let source = UrlSource::List(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(source.load(2).unwrap(), vec!["a", "b"]);
        assert_eq!(source.load(10).unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_file_source() {
        let path = std::env::temp_dir().join(format!("urlcheck-test-{}.txt", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "http://example.com").unwrap();
            writeln!(file, "# comment").unwrap();
            writeln!(file, "http://google.com").unwrap();
        }

        let urls = UrlSource::File(path.clone()).load(DEFAULT_MAX_URLS);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(urls.unwrap(), vec!["http://example.com", "http://google.com"]);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let source = UrlSource::File(PathBuf::from("/definitely/not/here.txt"));
        let err = source.load(DEFAULT_MAX_URLS).unwrap_err();
        assert!(err.to_string().contains("here.txt"));
    }
}
