// src/input/mod.rs
// =============================================================================
// This module figures out which URLs to check.
//
// The worker pool wants a plain Vec<String>; this module builds it from the
// command line, a file or stdin.
// =============================================================================

mod source;

pub use source::{parse_url_list, UrlSource, DEFAULT_MAX_URLS};
