//! Headless Chromium page session (cargo feature `browser`).

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ScraperError;
use crate::page::PageSession;

/// A live Chromium tab. Dropping it closes the browser.
pub struct ChromePage {
    _browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
}

impl ChromePage {
    /// Launches a headless browser and navigates to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Page`] if Chromium cannot be launched or the
    /// navigation fails.
    pub async fn launch(url: &str) -> Result<Self, ScraperError> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| ScraperError::page("configure browser", e))?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::page("launch browser", e))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("browser handler stopped");
                    break;
                }
            }
        });

        let page = browser
            .new_page(url)
            .await
            .map_err(|e| ScraperError::page(format!("open {url}"), e))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::page(format!("load {url}"), e))?;
        info!(url, "browser page ready");

        Ok(Self {
            _browser: browser,
            handler,
            page,
        })
    }
}

impl Drop for ChromePage {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl PageSession for ChromePage {
    async fn url(&self) -> Result<String, ScraperError> {
        self.page
            .url()
            .await
            .map_err(|e| ScraperError::page("read url", e))?
            .ok_or_else(|| ScraperError::page("read url", "page has no url"))
    }

    async fn html(&self) -> Result<String, ScraperError> {
        self.page
            .content()
            .await
            .map_err(|e| ScraperError::page("read content", e))
    }

    async fn click(&self, selector: &str) -> Result<(), ScraperError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| ScraperError::page(format!("find {selector}"), e))?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| ScraperError::page(format!("scroll to {selector}"), e))?;
        element
            .click()
            .await
            .map_err(|e| ScraperError::page(format!("click {selector}"), e))?;
        Ok(())
    }

    async fn scroll_into_view(&self, selector: &str) -> Result<(), ScraperError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|e| ScraperError::page(format!("find {selector}"), e))?;
        element
            .scroll_into_view()
            .await
            .map_err(|e| ScraperError::page(format!("scroll to {selector}"), e))?;
        Ok(())
    }
}
