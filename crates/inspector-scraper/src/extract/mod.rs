//! Field extractors for a listing page snapshot.
//!
//! Each field is located by an ordered list of strategies; the first
//! non-empty result wins and nothing is merged within a single field. The
//! DOM result is then overlaid with the page's structured `Product` data.

mod fields;

use chrono::{DateTime, Utc};
use inspector_core::{ListingSnapshot, MAX_LISTING_IMAGES};
use scraper::Html;

use crate::jsonld::read_structured_listing;

pub use fields::{
    extract_images, extract_listing_age_days, extract_sales_count, extract_seller_age_months,
    extract_seller_name, extract_title,
};

/// Selectors, keywords and thresholds used by the field extractors.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Tried in order; most specific first.
    pub title_selectors: Vec<String>,
    pub seller_selectors: Vec<String>,
    /// Listing images must be served from a host containing this marker.
    pub image_host_marker: String,
    pub min_image_width_px: u32,
    pub max_images: usize,
    /// Elements scanned for free-text facts (sales, tenure, listing date).
    pub text_scan_selector: String,
    /// Longest element text considered when looking for a sales count.
    pub max_sales_text_len: usize,
    /// Longest element text considered for tenure and listing-date phrases.
    pub max_phrase_text_len: usize,
    /// Dedicated tenure components, tried before the free-text scan.
    pub tenure_selectors: Vec<String>,
    /// Attribute carrying structured event data on a tenure component.
    pub tenure_event_attr: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            title_selectors: vec![
                r#"h1[data-buy-box-listing-title="true"]"#.to_owned(),
                "h1".to_owned(),
            ],
            seller_selectors: vec![
                r#"a[data-shop-name="true"]"#.to_owned(),
                r#"a[href*="/shop/"]"#.to_owned(),
                "[data-shop-name] a".to_owned(),
            ],
            image_host_marker: "etsystatic.com".to_owned(),
            min_image_width_px: 200,
            max_images: MAX_LISTING_IMAGES,
            text_scan_selector: "span, div, p".to_owned(),
            max_sales_text_len: 40,
            max_phrase_text_len: 120,
            tenure_selectors: vec![
                r#"[data-appears-component-name*="tenure"]"#.to_owned(),
                "[data-shop-tenure]".to_owned(),
                ".shop-tenure".to_owned(),
            ],
            tenure_event_attr: "data-appears-event-data".to_owned(),
        }
    }
}

/// Extracts a [`ListingSnapshot`] from page HTML.
///
/// Structured-data values take precedence over DOM values wherever both
/// exist (see [`ListingSnapshot::merged_with`]).
#[must_use]
pub fn extract_listing(
    html: &str,
    page_url: &str,
    now: DateTime<Utc>,
    cfg: &ExtractConfig,
) -> ListingSnapshot {
    let doc = Html::parse_document(html);

    let dom = ListingSnapshot {
        title: extract_title(&doc, cfg),
        images: extract_images(&doc, page_url, cfg),
        seller_name: extract_seller_name(&doc, cfg),
        sales_count: extract_sales_count(&doc, cfg),
        seller_age_months: extract_seller_age_months(&doc, now, cfg),
        listing_age_days: extract_listing_age_days(&doc, now, cfg),
    };
    let structured = read_structured_listing(&doc, page_url);

    tracing::debug!(
        page_url,
        has_structured = structured.is_some(),
        images = dom.images.len(),
        "extracted listing fields"
    );
    dom.merged_with(structured)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
