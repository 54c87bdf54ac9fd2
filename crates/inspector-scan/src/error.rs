use inspector_scraper::ScraperError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("analysis backend rejected the scan: {0}")]
    Rejected(String),

    #[error(transparent)]
    Scraper(#[from] ScraperError),
}
