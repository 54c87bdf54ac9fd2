//! Review acquisition engine.
//!
//! Strategies run strictly in sequence, each failing over to the next:
//!
//! 1. **API**: paginated reviews endpoint (needs listing + shop ids).
//! 2. **Dialog**: "view all reviews" link or in-page dialog with pagination.
//! 3. **Page fetch**: static fetch of the listing page, parsing its inline
//!    reviews section.
//!
//! A strategy that completes without reviews counts as a failure. Every
//! failure is recorded in the result's diagnostics; [`acquire_reviews`]
//! itself never fails.

mod api;
mod controls;
mod dialog;
mod ids;
mod reveal;
mod review_dom;
mod static_fetch;

use std::time::Duration;

use inspector_core::{AcquisitionResult, AcquisitionSource, AppConfig, Diagnostics, Review};
use tracing::{info, warn};

use crate::client::ListingClient;
use crate::clock::Clock;
use crate::error::ScraperError;
use crate::page::PageSession;

pub use ids::{listing_id_from_url, PageIdentifiers};
pub use reveal::open_reviews;

/// Throttling, polling and page caps for the acquisition strategies.
#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    /// Delay between reviews-API page requests.
    pub inter_request_delay_ms: u64,
    pub max_api_pages: u32,
    /// Hard cap on dialog pages parsed, including the first.
    pub max_dialog_pages: u32,
    pub dialog_poll_interval: Duration,
    pub dialog_poll_attempts: u32,
    pub page_change_poll_interval: Duration,
    pub page_change_timeout: Duration,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            inter_request_delay_ms: 250,
            max_api_pages: 50,
            max_dialog_pages: 20,
            dialog_poll_interval: Duration::from_millis(500),
            dialog_poll_attempts: 20,
            page_change_poll_interval: Duration::from_millis(250),
            page_change_timeout: Duration::from_secs(5),
        }
    }
}

impl AcquisitionConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            inter_request_delay_ms: config.inter_request_delay_ms,
            max_api_pages: config.max_api_pages,
            max_dialog_pages: config.max_dialog_pages,
            ..Self::default()
        }
    }

    /// Polls that fit in the page-change timeout; at least one.
    #[must_use]
    pub fn page_change_attempts(&self) -> u32 {
        let interval = self.page_change_poll_interval.as_millis().max(1);
        let attempts = self.page_change_timeout.as_millis().div_ceil(interval);
        u32::try_from(attempts).unwrap_or(u32::MAX).max(1)
    }
}

/// Everything one acquisition run needs.
pub struct AcquisitionContext<'a> {
    pub page: &'a dyn PageSession,
    pub client: &'a ListingClient,
    pub config: &'a AcquisitionConfig,
}

impl AcquisitionContext<'_> {
    pub(crate) fn clock(&self) -> &dyn Clock {
        self.client.clock()
    }
}

/// Acquires the listing's reviews through the first strategy that succeeds.
///
/// Never fails: when every strategy fails the result is empty with
/// `source = none`, and each failure is recorded under a `*_error` key in
/// the diagnostics. Strategy B mutates the live page, so this should run at
/// most once per scan.
pub async fn acquire_reviews(ctx: &AcquisitionContext<'_>) -> AcquisitionResult {
    let mut diagnostics = Diagnostics::new();

    let (page_url, live_html) = match snapshot_page(ctx.page).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "page unavailable, skipping review acquisition");
            diagnostics.insert("page_error".into(), e.to_string());
            return AcquisitionResult::none(diagnostics);
        }
    };

    let ids = PageIdentifiers::discover(&page_url, &live_html);
    record_identifiers(&ids, &mut diagnostics);

    match api::fetch_via_api(ctx, &page_url, &ids, &mut diagnostics).await {
        Ok(reviews) => return finish(reviews, AcquisitionSource::Api, diagnostics),
        Err(e) => record_failure("api", &e, &mut diagnostics),
    }

    match dialog::scrape_via_dialog(ctx, &page_url, &mut diagnostics).await {
        Ok((reviews, source)) => return finish(reviews, source, diagnostics),
        Err(e) => record_failure("dialog", &e, &mut diagnostics),
    }

    match static_fetch::scrape_via_page_fetch(ctx, &page_url, &live_html, &mut diagnostics).await
    {
        Ok(reviews) => return finish(reviews, AcquisitionSource::PageFetchScrape, diagnostics),
        Err(e) => record_failure("page_fetch", &e, &mut diagnostics),
    }

    warn!(page_url, "every review acquisition strategy failed");
    AcquisitionResult::none(diagnostics)
}

async fn snapshot_page(page: &dyn PageSession) -> Result<(String, String), ScraperError> {
    let url = page.url().await?;
    let html = page.html().await?;
    Ok((url, html))
}

fn record_identifiers(ids: &PageIdentifiers, diagnostics: &mut Diagnostics) {
    if let Some(id) = ids.listing_id {
        diagnostics.insert("listing_id".into(), id.to_string());
    }
    if let Some(id) = ids.shop_id {
        diagnostics.insert("shop_id".into(), id.to_string());
    }
    diagnostics.insert(
        "csrf_token".into(),
        if ids.csrf_token.is_some() { "present" } else { "absent" }.into(),
    );
}

fn record_failure(strategy: &str, err: &ScraperError, diagnostics: &mut Diagnostics) {
    warn!(strategy, error = %err, "review acquisition strategy failed");
    diagnostics.insert(format!("{strategy}_error"), err.to_string());
}

fn finish(
    reviews: Vec<Review>,
    source: AcquisitionSource,
    diagnostics: Diagnostics,
) -> AcquisitionResult {
    info!(%source, count = reviews.len(), "acquired reviews");
    AcquisitionResult {
        reviews,
        source,
        diagnostics,
    }
}

#[cfg(test)]
#[path = "acquire_test.rs"]
mod tests;
