//! Data model for scraped StockTitan articles.
//!
//! The pipeline produces exactly one [`ArticleRecord`] per article page it
//! manages to download. Every field is best-effort: a field whose markup is
//! missing from the page is carried as an empty string rather than failing
//! the record, so one site quirk never costs a whole row.

use serde::{Deserialize, Serialize};

/// One scraped news article, one CSV row.
///
/// Field declaration order is the CSV column order; `csv::Writer::serialize`
/// relies on it, and [`ArticleRecord::COLUMNS`] must be kept in sync.
///
/// # Fields
///
/// * `title` - Headline text from the article's `<h1>`
/// * `published_at` - ISO-8601 timestamp string as published by the site,
///   taken verbatim from the `datetime` attribute (not reparsed)
/// * `impact_score` - Numeric text between the parentheses of the impact
///   badge, e.g. `"73"` from `"Neutral (73)"`
/// * `sentiment_score` - Same shape as `impact_score`, from the sentiment badge
/// * `summary` - The news-card summary blurb
/// * `body` - Full article text with whitespace runs collapsed to single spaces
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ArticleRecord {
    pub title: String,
    pub published_at: String,
    pub impact_score: String,
    pub sentiment_score: String,
    pub summary: String,
    pub body: String,
}

impl ArticleRecord {
    /// CSV header, in the same order as the struct fields above.
    pub const COLUMNS: [&'static str; 6] = [
        "title",
        "published_at",
        "impact_score",
        "sentiment_score",
        "summary",
        "body",
    ];
}
