//! StockTitan news scraper.
//!
//! This module scrapes [StockTitan](https://www.stocktitan.net), which
//! publishes one listing page per calendar date at `/news/<YYYY-MM-DD>/`.
//! Each listing row links to an article page carrying a title, a publication
//! timestamp, impact and sentiment score badges, a summary card, and the
//! article body.
//!
//! # Failure policy
//!
//! A listing page that cannot be fetched fails that date only; the
//! surrounding window continues with the remaining dates. A single article
//! that cannot be fetched is logged and dropped; the remaining articles for
//! the date still go through. A field whose markup is missing from an
//! article page degrades to an empty string.

use crate::fetch::PageFetcher;
use crate::models::ArticleRecord;
use crate::utils::{collapse_whitespace, score_in_parens};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Site origin; relative listing links are resolved against it.
pub const BASE_URL: &str = "https://www.stocktitan.net";

static BASE: Lazy<Url> = Lazy::new(|| Url::parse(BASE_URL).unwrap());

static LISTING_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.news-row a.feed-link").unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static PUBLISHED: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());
static IMPACT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.impact-bar-container span.rhea-score").unwrap());
static SENTIMENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.sentiment-bar-container span.rhea-score").unwrap());
static SUMMARY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.news-card-summary div#summary").unwrap());
static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.article").unwrap());

/// Scrape every date in the window concurrently and aggregate the results
/// into one table.
///
/// One task runs per date; a date whose listing fetch fails is logged with
/// its cause and skipped, and its siblings run to completion regardless.
/// Record order reflects completion order of the concurrent fetches.
#[instrument(level = "info", skip_all, fields(dates = dates.len()))]
pub async fn scrape_window<F: PageFetcher>(
    fetcher: &F,
    dates: &[NaiveDate],
    concurrency: usize,
) -> Vec<ArticleRecord> {
    let results: Vec<(NaiveDate, Result<Vec<ArticleRecord>, Box<dyn Error>>)> =
        stream::iter(dates.iter().copied())
            .map(|date| async move { (date, scrape_date(fetcher, date, concurrency).await) })
            .buffer_unordered(dates.len().max(1))
            .collect()
            .await;

    let mut records: Vec<ArticleRecord> = Vec::new();
    let mut failed_dates = 0usize;
    for (date, result) in results {
        match result {
            Ok(batch) => {
                info!(%date, count = batch.len(), "Date completed");
                records.extend(batch);
            }
            Err(e) => {
                failed_dates += 1;
                error!(%date, error = %e, "Listing fetch failed; continuing with remaining dates");
            }
        }
    }
    info!(
        total = records.len(),
        dates = dates.len(),
        failed_dates,
        "Aggregated article records"
    );
    records
}

/// Scrape one calendar date end to end: index its listing page, then fetch
/// every discovered article with at most `concurrency` requests in flight.
///
/// # Errors
///
/// Fails if the listing page itself cannot be fetched (transport error or
/// non-success status). Individual article failures do not surface here;
/// they are dropped inside [`fetch_articles`].
#[instrument(level = "info", skip_all, fields(%date))]
pub async fn scrape_date<F: PageFetcher>(
    fetcher: &F,
    date: NaiveDate,
    concurrency: usize,
) -> Result<Vec<ArticleRecord>, Box<dyn Error>> {
    let urls = index_articles(fetcher, date).await?;
    Ok(fetch_articles(fetcher, urls, concurrency).await)
}

/// Index the listing page for one date and extract article URLs.
///
/// An empty listing page is not an error; it yields an empty vector.
///
/// # Errors
///
/// Returns an error if the listing page fetch fails.
pub async fn index_articles<F: PageFetcher>(
    fetcher: &F,
    date: NaiveDate,
) -> Result<Vec<String>, Box<dyn Error>> {
    let listing_url = format!("{BASE_URL}/news/{date}/");
    let html = fetcher.fetch_text(&listing_url).await?;
    let article_urls = parse_listing(&html);

    info!(
        count = article_urls.len(),
        listing = %listing_url,
        "Indexed article URLs"
    );
    debug!(urls = ?article_urls, "StockTitan URLs");

    Ok(article_urls)
}

/// Extract one article link per listing row, resolving relative hrefs
/// against the site origin. Rows whose link cannot be resolved are skipped.
pub fn parse_listing(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut article_urls = Vec::new();
    for element in document.select(&LISTING_LINK) {
        if let Some(href) = element.value().attr("href") {
            if let Ok(resolved) = BASE.join(href) {
                article_urls.push(resolved.to_string());
            }
        }
    }
    article_urls
}

/// Fetch all articles for one listing concurrently, at most `concurrency`
/// requests in flight.
///
/// Failed fetches are logged and skipped without failing the batch; record
/// order reflects completion order, not listing order.
#[instrument(level = "info", skip_all)]
pub async fn fetch_articles<F: PageFetcher>(
    fetcher: &F,
    urls: Vec<String>,
    concurrency: usize,
) -> Vec<ArticleRecord> {
    let records: Vec<ArticleRecord> = stream::iter(urls)
        .map(|url| async move {
            match fetch_article(fetcher, &url).await {
                Ok(record) => {
                    debug!(%url, "Fetched article");
                    Some(record)
                }
                Err(e) => {
                    warn!(error = %e, %url, "Article fetch failed; dropping it");
                    None
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = records.len(), "Fetched article contents");
    records
}

/// Fetch and parse a single article page.
async fn fetch_article<F: PageFetcher>(
    fetcher: &F,
    url: &str,
) -> Result<ArticleRecord, Box<dyn Error>> {
    let html = fetcher.fetch_text(url).await?;
    Ok(parse_article(&html))
}

/// Run the six field extractors against one article document.
///
/// The extractors are independent: each resolves its own locator chain and
/// falls back to an empty string when any step is missing. A record is
/// produced for every document, however sparse.
pub fn parse_article(html: &str) -> ArticleRecord {
    let document = Html::parse_document(html);

    let title = select_text(&document, &TITLE).unwrap_or_default();
    let published_at = document
        .select(&PUBLISHED)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .unwrap_or_default()
        .to_string();
    let impact_score = select_text(&document, &IMPACT)
        .map(|text| score_in_parens(&text))
        .unwrap_or_default();
    let sentiment_score = select_text(&document, &SENTIMENT)
        .map(|text| score_in_parens(&text))
        .unwrap_or_default();
    let summary = select_text(&document, &SUMMARY).unwrap_or_default();
    let body = select_text(&document, &BODY).unwrap_or_default();

    ArticleRecord {
        title,
        published_at,
        impact_score,
        sentiment_score,
        summary,
        body,
    }
}

/// Whitespace-normalized text of the first element matching `selector`, or
/// `None` if the document has no such element.
fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

/// Element text with every whitespace run (including the joins between text
/// nodes split by inline markup) collapsed to a single space.
fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Canned-page fetcher; any URL not in the map fails like a dead socket.
    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    impl StubFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
            }
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| format!("connection refused: {url}").into())
        }
    }

    fn article_html() -> String {
        r#"<html><body>
            <h1>Acme Corp Reports Q3 Results</h1>
            <time datetime="2025-05-06T13:30:00-04:00">May 6, 2025</time>
            <div class="impact-bar-container">
                <span class="rhea-score">Impact (73)</span>
            </div>
            <div class="sentiment-bar-container">
                <span class="rhea-score">Neutral (41)</span>
            </div>
            <div class="news-card-summary">
                <div id="summary">Acme beat estimates.</div>
            </div>
            <div class="article">Para one.

  Para two.</div>
        </body></html>"#
            .to_string()
    }

    fn listing_html(hrefs: &[&str]) -> String {
        let rows: String = hrefs
            .iter()
            .map(|href| {
                format!(
                    r#"<div class="news-row"><a class="feed-link" href="{href}">headline</a></div>"#
                )
            })
            .collect();
        format!("<html><body>{rows}</body></html>")
    }

    #[test]
    fn test_parse_article_extracts_all_fields() {
        let record = parse_article(&article_html());
        assert_eq!(record.title, "Acme Corp Reports Q3 Results");
        assert_eq!(record.published_at, "2025-05-06T13:30:00-04:00");
        assert_eq!(record.impact_score, "73");
        assert_eq!(record.sentiment_score, "41");
        assert_eq!(record.summary, "Acme beat estimates.");
        assert_eq!(record.body, "Para one. Para two.");
    }

    #[test]
    fn test_parse_article_missing_impact_container_degrades_only_that_field() {
        let html = article_html().replace("impact-bar-container", "impact-gone");
        let record = parse_article(&html);
        assert_eq!(record.impact_score, "");
        assert_eq!(record.title, "Acme Corp Reports Q3 Results");
        assert_eq!(record.sentiment_score, "41");
        assert_eq!(record.summary, "Acme beat estimates.");
        assert_eq!(record.body, "Para one. Para two.");
    }

    #[test]
    fn test_parse_article_empty_document_yields_empty_record() {
        let record = parse_article("<html><body></body></html>");
        assert_eq!(record, ArticleRecord::default());
    }

    #[test]
    fn test_parse_article_inline_markup_keeps_single_spaces() {
        let html = article_html().replace(
            "<h1>Acme Corp Reports Q3 Results</h1>",
            "<h1>Acme <b>Corp</b> Reports <em>Q3</em> Results</h1>",
        );
        let record = parse_article(&html);
        assert_eq!(record.title, "Acme Corp Reports Q3 Results");
    }

    #[test]
    fn test_parse_article_is_idempotent() {
        let html = article_html();
        assert_eq!(parse_article(&html), parse_article(&html));
    }

    #[test]
    fn test_parse_listing_resolves_relative_and_absolute_links() {
        let html = listing_html(&[
            "/news/acme/acme-q3-results.html",
            "https://www.stocktitan.net/news/beta/beta-update.html",
        ]);
        let urls = parse_listing(&html);
        assert_eq!(
            urls,
            vec![
                "https://www.stocktitan.net/news/acme/acme-q3-results.html",
                "https://www.stocktitan.net/news/beta/beta-update.html",
            ]
        );
    }

    #[test]
    fn test_parse_listing_ignores_rows_without_feed_link() {
        let html = r#"<div class="news-row"><a href="/plain">no class</a></div>
            <div class="news-row"><span>no link at all</span></div>"#;
        assert!(parse_listing(html).is_empty());
    }

    #[test]
    fn test_parse_listing_empty_page_is_valid() {
        assert!(parse_listing("<html><body></body></html>").is_empty());
    }

    #[tokio::test]
    async fn test_fetch_articles_drops_failed_article_and_keeps_rest() {
        let article = article_html();
        let pages: Vec<(&str, &str)> = vec![
            ("https://www.stocktitan.net/news/a.html", article.as_str()),
            ("https://www.stocktitan.net/news/b.html", article.as_str()),
            ("https://www.stocktitan.net/news/c.html", article.as_str()),
            ("https://www.stocktitan.net/news/d.html", article.as_str()),
            // e.html intentionally absent: its fetch fails transport-level
        ];
        let fetcher = StubFetcher::new(&pages);
        let urls = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|n| format!("https://www.stocktitan.net/news/{n}.html"))
            .collect();

        let records = fetch_articles(&fetcher, urls, 8).await;
        assert_eq!(records.len(), 4);
    }

    #[tokio::test]
    async fn test_scrape_date_returns_error_when_listing_fetch_fails() {
        let fetcher = StubFetcher::new(&[]);
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();
        assert!(scrape_date(&fetcher, date, 8).await.is_err());
    }

    #[tokio::test]
    async fn test_scrape_date_happy_path() {
        let listing = listing_html(&["/news/acme/acme-q3-results.html"]);
        let article = article_html();
        let fetcher = StubFetcher::new(&[
            ("https://www.stocktitan.net/news/2025-05-06/", listing.as_str()),
            (
                "https://www.stocktitan.net/news/acme/acme-q3-results.html",
                article.as_str(),
            ),
        ]);
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();

        let records = scrape_date(&fetcher, date, 8).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].impact_score, "73");
    }

    #[tokio::test]
    async fn test_scrape_date_empty_listing_is_ok() {
        let listing = listing_html(&[]);
        let fetcher = StubFetcher::new(&[(
            "https://www.stocktitan.net/news/2025-05-06/",
            listing.as_str(),
        )]);
        let date = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();

        let records = scrape_date(&fetcher, date, 8).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_window_keeps_surviving_dates_when_one_listing_fails() {
        let listing_a = listing_html(&["/news/acme/a1.html", "/news/acme/a2.html"]);
        let listing_b = listing_html(&["/news/beta/b1.html"]);
        let article_a = article_html();
        let article_b = article_html().replace("Acme Corp Reports Q3 Results", "Beta Ltd Update");
        let fetcher = StubFetcher::new(&[
            ("https://www.stocktitan.net/news/2025-05-06/", listing_a.as_str()),
            ("https://www.stocktitan.net/news/2025-05-05/", listing_b.as_str()),
            // 2025-05-04 listing intentionally absent: its fetch fails
            ("https://www.stocktitan.net/news/acme/a1.html", article_a.as_str()),
            ("https://www.stocktitan.net/news/acme/a2.html", article_a.as_str()),
            ("https://www.stocktitan.net/news/beta/b1.html", article_b.as_str()),
        ]);
        let dates = vec![
            NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
            NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(),
        ];

        let records = scrape_window(&fetcher, &dates, 8).await;
        assert_eq!(records.len(), 3);
        let beta_count = records
            .iter()
            .filter(|r| r.title == "Beta Ltd Update")
            .count();
        assert_eq!(beta_count, 1);
    }
}
