//! HTTP client that fetches a regulation page and extracts a query snippet.

use std::time::Duration;

use normas_core::SnippetOutcome;
use thiserror::Error;
use tracing::{info, warn};

use crate::html::visible_text;

/// Per-request timeout applied to every page fetch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}")]
    Server { status: u16 },
}

/// Fetches regulation pages, one bounded-timeout GET per call.
///
/// No retries and no caching: asking twice for the same URL makes two
/// requests.
pub struct SnippetClient {
    client: reqwest::Client,
}

impl SnippetClient {
    /// Create a client with the default 10 second timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("normas/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return its body text, decoded with the charset the
    /// response declares (UTF-8 otherwise). Non-success statuses are errors.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        info!(url = %url, "fetching regulation page");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Server {
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }

    /// Fetch the page at `url` and pick the sentence that best overlaps
    /// `query`.
    ///
    /// Never fails: any fetch error is logged and reported as
    /// [`SnippetOutcome::NetworkFailure`].
    pub async fn snippet(&self, url: &str, query: &str) -> SnippetOutcome {
        match self.fetch_page(url).await {
            Ok(html) => SnippetOutcome::from_page_text(&visible_text(&html), query),
            Err(e) => {
                warn!(url = %url, error = %e, "could not fetch regulation page");
                SnippetOutcome::NetworkFailure
            }
        }
    }
}
