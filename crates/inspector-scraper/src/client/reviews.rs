//! Multi-page review fetch loop for `ListingClient`.

use std::time::Duration;

use inspector_core::{Review, ReviewAccumulator};
use tracing::{debug, warn};

use crate::error::ScraperError;
use crate::normalize::normalize_review;

use super::ListingClient;

/// Every review the API returned for a listing, deduplicated.
#[derive(Debug, Clone, Default)]
pub struct ApiReviews {
    pub reviews: Vec<Review>,
    /// Page count declared by the first response.
    pub declared_pages: u32,
    pub pages_fetched: u32,
}

impl ListingClient {
    /// Fetches every declared page of reviews for a listing.
    ///
    /// Starts at page 1 and continues until the page count declared by the
    /// first response is reached, capped at `max_pages`. `inter_request_delay_ms`
    /// is slept between page requests (not before the first).
    ///
    /// Reviews are deduplicated across pages by [`Review::identity_key`]: the
    /// transaction id when present, otherwise reviewer profile + date + text.
    ///
    /// **All-or-nothing semantics**: on any page failure, reviews from earlier
    /// pages are discarded and the error is returned, so a truncated API
    /// result is never mistaken for the complete set.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_reviews_page`].
    pub async fn fetch_all_reviews(
        &self,
        page_url: &str,
        listing_id: u64,
        shop_id: u64,
        csrf_token: Option<&str>,
        inter_request_delay_ms: u64,
        max_pages: u32,
    ) -> Result<ApiReviews, ScraperError> {
        let mut accumulator = ReviewAccumulator::new();
        let mut declared_pages = 1u32;
        let mut last_page = 1u32;
        let mut page = 1u32;

        loop {
            if page > 1 && inter_request_delay_ms > 0 {
                self.clock
                    .sleep(Duration::from_millis(inter_request_delay_ms))
                    .await;
            }

            let response = self
                .fetch_reviews_page(page_url, listing_id, shop_id, page, csrf_token)
                .await?;

            if page == 1 {
                declared_pages = response.page_count.unwrap_or(1).max(1);
                last_page = declared_pages.min(max_pages.max(1));
                if last_page < declared_pages {
                    warn!(
                        listing_id,
                        declared_pages,
                        max_pages,
                        "reviews api declared more pages than allowed, capping"
                    );
                }
            }

            let received = response.reviews.len();
            let mut added = 0usize;
            for raw in response.reviews {
                if let Some(review) = normalize_review(raw, page_url) {
                    if accumulator.insert(review) {
                        added += 1;
                    }
                }
            }
            debug!(listing_id, page, received, added, "fetched reviews page");

            if page >= last_page {
                break;
            }
            page += 1;
        }

        Ok(ApiReviews {
            reviews: accumulator.into_reviews(),
            declared_pages,
            pages_fetched: page,
        })
    }
}
