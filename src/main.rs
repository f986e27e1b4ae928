//! # StockTitan News
//!
//! A scraper that collects recent StockTitan press-release articles across a
//! window of calendar dates and aggregates them into one CSV table.
//!
//! ## Features
//!
//! - Visits one listing page per date (today backward, 4 days by default)
//! - Fetches every discovered article concurrently, bounded per date
//! - Extracts title, publication timestamp, impact score, sentiment score,
//!   summary, and body text, each field best-effort
//! - Writes a single `stocktitan_<YYYY-MM-DD>.csv` after all fetches finish
//!
//! ## Usage
//!
//! ```sh
//! stocktitan_news --days 4 --output-dir . --concurrency 8
//! ```
//!
//! ## Architecture
//!
//! The application is a two-level fan-out with one fan-in:
//! 1. **Dates**: one concurrent task per date in the window
//! 2. **Articles**: within each date, one bounded concurrent fetch per link
//! 3. **Aggregate**: all records collect into one table; a failed date is
//!    logged and skipped, never aborting its siblings
//! 4. **Output**: the table is written once, after a full barrier

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use scrapers::stocktitan;
use utils::{date_window, ensure_writable_dir};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("stocktitan_news starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, days = args.days, concurrency = args.concurrency, "Parsed CLI arguments");

    // Early check: a run that cannot write its CSV should fail before any
    // network work
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // One shared HTTP client for the whole run
    let fetcher = HttpFetcher::new()?;

    let run_date = Local::now().date_naive();
    let dates = date_window(run_date, args.days);
    info!(%run_date, days = args.days, "Scraping date window");

    // ---- Scrape the whole window; failed dates are isolated inside ----
    let records = stocktitan::scrape_window(&fetcher, &dates, args.concurrency).await;

    // ---- Write the CSV; an output failure is fatal, no retry ----
    let path = outputs::csv::write_table(&records, &args.output_dir, run_date).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        path = %path,
        rows = records.len(),
        "Execution complete"
    );

    Ok(())
}
