use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::review::Review;

/// Identifiers and error strings recorded while acquiring reviews.
pub type Diagnostics = BTreeMap<String, String>;

/// Which acquisition path produced the reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcquisitionSource {
    Api,
    DialogScrape,
    PageFetchScrape,
    #[default]
    None,
}

impl std::fmt::Display for AcquisitionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquisitionSource::Api => write!(f, "api"),
            AcquisitionSource::DialogScrape => write!(f, "dialog-scrape"),
            AcquisitionSource::PageFetchScrape => write!(f, "page-fetch-scrape"),
            AcquisitionSource::None => write!(f, "none"),
        }
    }
}

/// Output of the review acquisition engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionResult {
    pub reviews: Vec<Review>,
    pub source: AcquisitionSource,
    #[serde(default)]
    pub diagnostics: Diagnostics,
}

impl AcquisitionResult {
    /// Result for a scan where every strategy failed.
    #[must_use]
    pub fn none(diagnostics: Diagnostics) -> Self {
        Self {
            reviews: Vec::new(),
            source: AcquisitionSource::None,
            diagnostics,
        }
    }

    /// Human-readable cause when no reviews were acquired.
    #[must_use]
    pub fn failure_summary(&self) -> Option<String> {
        if self.source != AcquisitionSource::None {
            return None;
        }
        let errors: Vec<String> = self
            .diagnostics
            .iter()
            .filter(|(k, _)| k.ends_with("_error"))
            .map(|(k, v)| format!("{k}: {v}"))
            .collect();
        if errors.is_empty() {
            Some("no reviews found".to_owned())
        } else {
            Some(errors.join("; "))
        }
    }
}
