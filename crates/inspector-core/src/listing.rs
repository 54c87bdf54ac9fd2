use serde::{Deserialize, Serialize};

/// Upper bound on the number of listing images kept in a snapshot.
pub const MAX_LISTING_IMAGES: usize = 20;

/// Facts extracted from a single view of a listing page.
///
/// Every field is independently optional: a missing seller name says nothing
/// about whether the sales count or tenure could be read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSnapshot {
    pub title: Option<String>,
    /// Resolved image URLs in page order, deduplicated and capped at
    /// [`MAX_LISTING_IMAGES`].
    #[serde(default)]
    pub images: Vec<String>,
    pub seller_name: Option<String>,
    /// Parsed from compact counts such as `"1.2k Sales"`.
    pub sales_count: Option<u64>,
    /// Seller tenure, always in months.
    pub seller_age_months: Option<u32>,
    pub listing_age_days: Option<u32>,
}

/// Values read from an embedded schema.org `Product` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredListing {
    pub title: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Brand name when present, otherwise the seller name.
    pub seller_name: Option<String>,
}

impl ListingSnapshot {
    /// Overlays structured-data values on top of DOM-scraped ones.
    ///
    /// Precedence: a structured value wins whenever it is present (non-empty);
    /// otherwise the DOM value is kept. Fields the structured block never
    /// carries (sales, tenure, listing age) are untouched.
    #[must_use]
    pub fn merged_with(mut self, structured: Option<StructuredListing>) -> Self {
        let Some(structured) = structured else {
            return self;
        };

        if let Some(title) = structured.title.filter(|t| !t.trim().is_empty()) {
            self.title = Some(title);
        }
        if let Some(seller) = structured.seller_name.filter(|s| !s.trim().is_empty()) {
            self.seller_name = Some(seller);
        }
        if !structured.images.is_empty() {
            let mut images = structured.images;
            images.truncate(MAX_LISTING_IMAGES);
            self.images = images;
        }
        self
    }

    /// Seller tenure in whole years, for display and coarse comparisons.
    #[must_use]
    pub fn seller_age_years(&self) -> Option<u32> {
        self.seller_age_months.map(|m| m / 12)
    }
}
