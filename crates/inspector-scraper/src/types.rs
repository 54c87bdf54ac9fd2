//! Wire types for the listing reviews API.
//!
//! ## Request
//! A POST with a nested spec payload:
//!
//! ```json
//! {
//!   "log_performance_metrics": false,
//!   "specs": {
//!     "reviews": [
//!       "Listzilla_ApiSpecs_Reviews",
//!       { "listing_id": 123, "shop_id": 456, "scope": "listingReviews",
//!         "page": 1, "sort_option": "Relevancy", "tag_filters": [],
//!         "should_lazy_load_images": false }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Response
//! `page_count` declares how many pages exist; `reviews` holds the raw
//! records for the requested page. Observed payloads are inconsistent about
//! numeric ids (number vs. string) and about several field names, so every
//! field is optional and ids are parsed leniently.

use serde::{Deserialize, Deserializer, Serialize};

pub(crate) const REVIEWS_SPEC_NAME: &str = "Listzilla_ApiSpecs_Reviews";
pub(crate) const REVIEWS_SCOPE: &str = "listingReviews";

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsRequest {
    pub log_performance_metrics: bool,
    pub specs: ReviewsSpecs,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsSpecs {
    /// Serialized as a two-element array: spec name, then parameters.
    pub reviews: (String, ReviewsSpecParams),
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsSpecParams {
    pub listing_id: u64,
    pub shop_id: u64,
    pub scope: String,
    pub page: u32,
    pub sort_option: String,
    pub tag_filters: Vec<String>,
    pub should_lazy_load_images: bool,
}

impl ReviewsRequest {
    #[must_use]
    pub fn for_page(listing_id: u64, shop_id: u64, page: u32, sort_option: &str) -> Self {
        Self {
            log_performance_metrics: false,
            specs: ReviewsSpecs {
                reviews: (
                    REVIEWS_SPEC_NAME.to_owned(),
                    ReviewsSpecParams {
                        listing_id,
                        shop_id,
                        scope: REVIEWS_SCOPE.to_owned(),
                        page,
                        sort_option: sort_option.to_owned(),
                        tag_filters: Vec::new(),
                        should_lazy_load_images: false,
                    },
                ),
            },
        }
    }
}

/// One page of the reviews API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsPageResponse {
    #[serde(default, alias = "total_pages", alias = "pageCount")]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    #[serde(default, deserialize_with = "de_lenient_u64")]
    pub transaction_id: Option<u64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, alias = "text", alias = "review_text")]
    pub review: Option<String>,
    #[serde(default)]
    pub translated_review: Option<String>,
    #[serde(default)]
    pub is_recommended: Option<bool>,
    #[serde(default)]
    pub reviewer: Option<RawReviewer>,
    #[serde(default, alias = "date", alias = "created_date_formatted")]
    pub create_date: Option<String>,
    #[serde(default)]
    pub seller_response: Option<String>,
    #[serde(default, alias = "photo_url")]
    pub appreciation_photo_url: Option<String>,
    #[serde(default)]
    pub has_video: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReviewer {
    #[serde(default, alias = "display_name")]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Accepts `123`, `"123"`, `null` or a missing field.
fn de_lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_spec_as_two_element_array() {
        let body = serde_json::to_value(ReviewsRequest::for_page(1, 2, 3, "Relevancy")).unwrap();
        let spec = &body["specs"]["reviews"];
        assert_eq!(spec[0], REVIEWS_SPEC_NAME);
        assert_eq!(spec[1]["listing_id"], 1);
        assert_eq!(spec[1]["shop_id"], 2);
        assert_eq!(spec[1]["page"], 3);
        assert_eq!(spec[1]["scope"], "listingReviews");
    }

    #[test]
    fn response_accepts_string_transaction_ids_and_aliases() {
        let raw = json!({
            "total_pages": 4,
            "reviews": [
                {"transaction_id": "987", "text": "Lovely", "date": "Mar 3, 2024"},
                {"transaction_id": 654, "review": "Fine"},
                {"transaction_id": null}
            ]
        });
        let page: ReviewsPageResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(page.page_count, Some(4));
        assert_eq!(page.reviews[0].transaction_id, Some(987));
        assert_eq!(page.reviews[0].review.as_deref(), Some("Lovely"));
        assert_eq!(page.reviews[0].create_date.as_deref(), Some("Mar 3, 2024"));
        assert_eq!(page.reviews[1].transaction_id, Some(654));
        assert_eq!(page.reviews[2].transaction_id, None);
    }
}
