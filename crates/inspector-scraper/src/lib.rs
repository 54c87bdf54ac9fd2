//! Listing page extraction and review acquisition.

pub mod acquire;
#[cfg(feature = "browser")]
pub mod chrome;
pub mod client;
pub mod clock;
mod dom;
pub mod error;
pub mod extract;
pub mod images;
pub mod jsonld;
pub mod normalize;
pub mod page;
pub mod parse;
mod rate_limit;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use acquire::{
    acquire_reviews, open_reviews, AcquisitionConfig, AcquisitionContext, PageIdentifiers,
};
#[cfg(feature = "browser")]
pub use chrome::ChromePage;
pub use client::{ApiReviews, ListingClient};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ScraperError;
pub use extract::{extract_listing, ExtractConfig};
pub use page::{PageSession, StaticPage};
