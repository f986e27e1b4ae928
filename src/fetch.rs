//! HTTP page fetching behind a mockable seam.
//!
//! The whole run shares one [`HttpFetcher`] (and therefore one
//! `reqwest::Client` connection pool). The [`PageFetcher`] trait exists so
//! the scraper logic can be exercised in tests with canned documents and
//! injected failures instead of a live site.

use std::error::Error;
use std::time::Duration;
use tracing::debug;

/// Per-request timeout; an unresponsive server must not hang the run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for fetching the text body of a page by URL.
///
/// Implementors return the response body on HTTP success, and an error for
/// transport failures or non-success status codes. Callers decide whether
/// that error is fatal to their task.
pub trait PageFetcher {
    /// GET `url` and return the response body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// The real fetcher, backed by a shared `reqwest::Client`.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the fetcher and its connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend cannot be initialized.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("stocktitan_news/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}
