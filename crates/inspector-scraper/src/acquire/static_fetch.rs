//! Strategy C: fetch the listing page statically and parse its reviews.

use inspector_core::{Diagnostics, Review};
use tracing::{debug, warn};

use super::review_dom::parse_container_reviews;
use super::AcquisitionContext;
use crate::error::ScraperError;

/// Re-fetches `page_url` over HTTP and parses the inline reviews section.
///
/// When the fetch fails, or the fetched copy has no reviews, the live
/// snapshot taken at the start of acquisition is parsed instead.
pub(super) async fn scrape_via_page_fetch(
    ctx: &AcquisitionContext<'_>,
    page_url: &str,
    live_html: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Review>, ScraperError> {
    match ctx.client.fetch_html(page_url).await {
        Ok(fetched) => {
            let reviews = parse_container_reviews(&fetched, page_url);
            debug!(page_url, count = reviews.len(), "parsed fetched page");
            if !reviews.is_empty() {
                return Ok(reviews);
            }
        }
        Err(e) => {
            warn!(page_url, error = %e, "static page fetch failed, parsing live snapshot");
            diagnostics.insert("page_fetch_request_error".into(), e.to_string());
        }
    }

    let reviews = parse_container_reviews(live_html, page_url);
    if reviews.is_empty() {
        return Err(ScraperError::NoReviews {
            strategy: "page fetch",
        });
    }
    Ok(reviews)
}
