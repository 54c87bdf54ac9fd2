//! The live page a scan runs against.
//!
//! Extractors only ever see HTML snapshots taken through [`PageSession::html`];
//! Strategy B additionally clicks controls. Snapshots are parsed inside
//! synchronous helpers, so no parsed document is held across an `.await`.

use async_trait::async_trait;

use crate::client::ListingClient;
use crate::error::ScraperError;

#[async_trait]
pub trait PageSession: Send + Sync {
    /// URL of the document currently shown.
    async fn url(&self) -> Result<String, ScraperError>;

    /// Current rendered HTML, including any open dialog.
    async fn html(&self) -> Result<String, ScraperError>;

    /// Clicks the first element matching `selector`.
    async fn click(&self, selector: &str) -> Result<(), ScraperError>;

    /// Scrolls the first element matching `selector` into view.
    async fn scroll_into_view(&self, selector: &str) -> Result<(), ScraperError>;
}

/// A page fetched once over HTTP. It never changes and cannot be clicked.
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
    html: String,
}

impl StaticPage {
    #[must_use]
    pub fn from_html(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Fetches `url` and wraps the response body.
    ///
    /// # Errors
    ///
    /// Propagates any [`ScraperError`] from [`ListingClient::fetch_html`].
    pub async fn fetch(client: &ListingClient, url: &str) -> Result<Self, ScraperError> {
        let html = client.fetch_html(url).await?;
        Ok(Self::from_html(url, html))
    }
}

#[async_trait]
impl PageSession for StaticPage {
    async fn url(&self) -> Result<String, ScraperError> {
        Ok(self.url.clone())
    }

    async fn html(&self) -> Result<String, ScraperError> {
        Ok(self.html.clone())
    }

    async fn click(&self, selector: &str) -> Result<(), ScraperError> {
        Err(ScraperError::page(
            format!("click {selector}"),
            "static pages are not interactive",
        ))
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), ScraperError> {
        Err(ScraperError::page(
            format!("scroll to {selector}"),
            "static pages are not interactive",
        ))
    }
}
