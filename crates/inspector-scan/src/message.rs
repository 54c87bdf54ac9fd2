//! Request and response shapes exchanged with the UI collaborator.
//!
//! Field names are camelCase on the wire, matching what the popup reads.

use inspector_core::{AcquisitionSource, Diagnostics, ListingSnapshot, Review, RiskReport};
use inspector_risk::{RiskLevel, SellerTrust};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    ScanListing,
    OpenReviews,
}

/// The listing snapshot with its reviews inlined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanData {
    #[serde(flatten)]
    pub listing: ListingSnapshot,
    pub reviews: Vec<Review>,
    /// How the reviews were obtained, and why not when they weren't.
    pub review_fetch: ReviewFetch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFetch {
    pub source: AcquisitionSource,
    #[serde(default)]
    pub diagnostics: Diagnostics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Display bands derived from the report and snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub risk_level: RiskLevel,
    pub risk_color: &'static str,
    pub seller_trust: SellerTrust,
    pub seller_trust_color: &'static str,
    /// e.g. `"2 years 6 months"`.
    pub shop_age: String,
    pub review_count: usize,
}

impl Assessment {
    #[must_use]
    pub fn new(listing: &ListingSnapshot, reviews: &[Review], report: &RiskReport) -> Self {
        let level = RiskLevel::from_score(report.risk_score);
        let trust = SellerTrust::assess(listing.seller_age_months, listing.sales_count);
        Self {
            risk_level: level,
            risk_color: level.color(),
            seller_trust: trust,
            seller_trust_color: trust.color(),
            shop_age: inspector_risk::format_tenure(listing.seller_age_months),
            review_count: reviews.len(),
        }
    }
}

/// Reply to [`Request::ScanListing`]. `ok` stays true when only review
/// acquisition or the analysis backend failed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub ok: bool,
    pub url: String,
    pub data: ScanData,
    pub report: RiskReport,
    pub assessment: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenReviewsResponse {
    pub opened: bool,
}

/// Reply when the page itself could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedResponse {
    pub ok: bool,
    pub error: String,
}

impl FailedResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Scan(Box<ScanResponse>),
    OpenReviews(OpenReviewsResponse),
    Failed(FailedResponse),
}
