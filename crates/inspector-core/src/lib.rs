//! Shared data model and configuration for the listing inspector.
//!
//! Every entity here is created fresh per scan; nothing is persisted.

pub mod acquisition;
pub mod app_config;
pub mod config;
pub mod listing;
pub mod report;
pub mod review;

use thiserror::Error;

pub use acquisition::{AcquisitionResult, AcquisitionSource, Diagnostics};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{ListingSnapshot, StructuredListing, MAX_LISTING_IMAGES};
pub use report::RiskReport;
pub use review::{truncate_chars, Review, ReviewAccumulator, MAX_REVIEW_TEXT_CHARS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
