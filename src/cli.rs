//! Command-line interface definitions for the StockTitan scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option carries a default, so a bare `stocktitan_news` invocation
//! scrapes the last four days into the current directory.

use clap::Parser;

/// Command-line arguments for the StockTitan news scraper.
///
/// # Examples
///
/// ```sh
/// # Scrape the default window (today and the 3 preceding days)
/// stocktitan_news
///
/// # A wider window, written elsewhere, with more fetches in flight
/// stocktitan_news --days 7 --output-dir ./data --concurrency 16
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the CSV file is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Number of calendar days to scrape, counting back from today
    #[arg(short, long, default_value_t = 4)]
    pub days: u32,

    /// Maximum number of article fetches in flight per date
    #[arg(short, long, default_value_t = 8)]
    pub concurrency: usize,
}
