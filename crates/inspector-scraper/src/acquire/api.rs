//! Strategy A: the paginated reviews API.

use inspector_core::{Diagnostics, Review};
use tracing::info;

use super::ids::PageIdentifiers;
use super::AcquisitionContext;
use crate::error::ScraperError;

/// Fetches every review through the API.
///
/// Requires both the listing id and the shop id; without either the
/// strategy is skipped with [`ScraperError::MissingIdentifier`]. Any page
/// failure aborts the whole strategy; partial API results are never returned.
pub(super) async fn fetch_via_api(
    ctx: &AcquisitionContext<'_>,
    page_url: &str,
    ids: &PageIdentifiers,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Review>, ScraperError> {
    let listing_id = ids
        .listing_id
        .ok_or(ScraperError::MissingIdentifier("listing id"))?;
    let shop_id = ids
        .shop_id
        .ok_or(ScraperError::MissingIdentifier("shop id"))?;

    info!(listing_id, shop_id, "fetching reviews through api");
    let fetched = ctx
        .client
        .fetch_all_reviews(
            page_url,
            listing_id,
            shop_id,
            ids.csrf_token.as_deref(),
            ctx.config.inter_request_delay_ms,
            ctx.config.max_api_pages,
        )
        .await?;

    diagnostics.insert("api_declared_pages".into(), fetched.declared_pages.to_string());
    diagnostics.insert("api_pages_fetched".into(), fetched.pages_fetched.to_string());

    if fetched.reviews.is_empty() {
        return Err(ScraperError::NoReviews { strategy: "api" });
    }
    Ok(fetched.reviews)
}
