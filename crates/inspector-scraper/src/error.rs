use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("page session failed to {action}: {reason}")]
    Page { action: String, reason: String },

    #[error("{0} not found on page")]
    MissingIdentifier(&'static str),

    #[error("reviews control not found: {0}")]
    ControlNotFound(String),

    #[error("review dialog did not appear after {attempts} polls")]
    DialogTimeout { attempts: u32 },

    #[error("{strategy} produced no reviews")]
    NoReviews { strategy: &'static str },
}

impl ScraperError {
    pub(crate) fn page(action: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Page {
            action: action.into(),
            reason: reason.to_string(),
        }
    }
}
