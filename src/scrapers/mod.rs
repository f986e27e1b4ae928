//! Site scrapers.
//!
//! Each scraper follows a consistent two-phase pattern:
//!
//! 1. **Indexing**: Discover article URLs from a listing page
//! 2. **Fetching**: Download and parse article content from each URL
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | StockTitan | [`stocktitan`] | HTML scraping | One listing page per calendar date |
//!
//! # Common Patterns
//!
//! Scrapers use:
//! - Concurrent fetching with `futures::stream` bounded by `buffer_unordered`
//! - Graceful error handling (failed article fetches are logged and skipped)
//! - Best-effort field extraction (missing markup degrades to an empty field)
//!
//! The HTML class and tag names targeted here are an external contract the
//! site can change at any time; extraction is written to degrade rather than
//! fail when that happens.

pub mod stocktitan;
