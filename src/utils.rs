//! Utility functions for date windows, text extraction, and file system checks.
//!
//! This module provides the small pure helpers used throughout the pipeline:
//! - Date window generation for picking which listing pages to visit
//! - Bracketed-score extraction for the impact/sentiment badges
//! - Whitespace collapsing for article body text
//! - File system validation for the output directory

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Produce the window of dates to scrape: `today`, `today - 1`, ...
/// `today - (days - 1)`, newest first.
///
/// Pure and deterministic given its inputs; `days == 0` yields an empty
/// window.
///
/// # Arguments
///
/// * `today` - The reference date the window counts back from
/// * `days` - The window size in days
pub fn date_window(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days)
        .map(|i| today - Duration::days(i64::from(i)))
        .collect()
}

/// Extract the text between the outermost parentheses of a score badge.
///
/// StockTitan renders impact and sentiment as `label(NUMBER)`, e.g.
/// `"Neutral (73)"`. Text with no opening parenthesis, no closing
/// parenthesis after it, or nothing between them yields an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(score_in_parens("Neutral (73)"), "73");
/// assert_eq!(score_in_parens("Neutral ()"), "");
/// assert_eq!(score_in_parens("Neutral"), "");
/// ```
pub fn score_in_parens(text: &str) -> String {
    let Some(open) = text.find('(') else {
        return String::new();
    };
    match text.rfind(')') {
        Some(close) if close > open => text[open + 1..close].trim().to_string(),
        _ => String::new(),
    }
}

/// Collapse every run of whitespace (spaces, tabs, newlines) to a single
/// ASCII space and trim the ends.
///
/// Article bodies arrive with the site's layout whitespace baked in; this
/// normalizes them to one readable line for the CSV cell.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(collapse_whitespace("Para one.\n\n  Para two."), "Para one. Para two.");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Make sure the CSV output directory exists and accepts writes.
///
/// Creates the directory if needed, then drops a throwaway probe file into
/// it and deletes it again. Runs before any listing page is fetched, so a
/// run that could never save its table stops immediately.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the probe write
/// fails (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/.csv_write_probe", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory accepts writes");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
