//! HTTP client for listing pages and the listing reviews API.

mod origin;
mod reviews;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::clock::Clock;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{ReviewsPageResponse, ReviewsRequest};

pub use origin::{absolutize_url, extract_origin};
pub use reviews::ApiReviews;

/// Path of the reviews endpoint, relative to the listing's origin.
pub(crate) const REVIEWS_API_PATH: &str = "/api/v3/ajax/bespoke/member/neu/specs/reviews";

/// Sort order requested from the reviews endpoint.
pub(crate) const REVIEWS_SORT_OPTION: &str = "Relevancy";

/// HTTP client shared by every acquisition strategy.
///
/// Handles rate limiting (429) and other non-2xx responses as typed errors.
/// Transient errors (429, network failures) are retried with exponential
/// backoff up to `max_retries` additional attempts; backoff sleeps go through
/// the injected [`Clock`].
pub struct ListingClient {
    pub(super) client: Client,
    pub(super) clock: Arc<dyn Clock>,
    /// Maximum number of retry attempts after the first failure.
    pub(super) max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub(super) backoff_base_secs: u64,
}

impl ListingClient {
    /// Creates a `ListingClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            clock,
            max_retries,
            backoff_base_secs,
        })
    }

    /// The clock used for backoff and throttling sleeps.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Fetches a page as HTML text, with automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`ScraperError::RateLimited`] after all retries are exhausted on 429.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`ScraperError::Http`] on network failure after all retries.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", parsed.scheme()),
            });
        }

        retry_with_backoff(
            self.clock.as_ref(),
            self.max_retries,
            self.backoff_base_secs,
            || async move {
                let response = self
                    .client
                    .get(url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                check_status(&response, url)?;
                Ok(response.text().await?)
            },
        )
        .await
    }

    /// Fetches one page of the reviews API.
    ///
    /// `csrf_token`, when present, is sent as `x-csrf-token`.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] after all retries are exhausted on 429.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-2xx status (not retried).
    /// - [`ScraperError::Http`] on network failure after all retries.
    /// - [`ScraperError::Deserialize`] if the body is not a reviews page (not retried).
    pub async fn fetch_reviews_page(
        &self,
        page_url: &str,
        listing_id: u64,
        shop_id: u64,
        page: u32,
        csrf_token: Option<&str>,
    ) -> Result<ReviewsPageResponse, ScraperError> {
        let origin = extract_origin(page_url);
        let url = format!("{origin}{REVIEWS_API_PATH}");
        let payload = ReviewsRequest::for_page(listing_id, shop_id, page, REVIEWS_SORT_OPTION);

        retry_with_backoff(
            self.clock.as_ref(),
            self.max_retries,
            self.backoff_base_secs,
            || {
                let url = url.clone();
                let origin = origin.clone();
                let payload = &payload;
                async move {
                    let mut request = self
                        .client
                        .post(&url)
                        .header(reqwest::header::ACCEPT, "application/json")
                        .header(reqwest::header::REFERER, page_url)
                        .header(reqwest::header::ORIGIN, &origin)
                        .header("x-requested-with", "XMLHttpRequest")
                        .json(payload);
                    if let Some(token) = csrf_token {
                        request = request.header("x-csrf-token", token);
                    }

                    let response = request.send().await?;
                    check_status(&response, &url)?;

                    let body = response.text().await?;
                    serde_json::from_str::<ReviewsPageResponse>(&body).map_err(|e| {
                        ScraperError::Deserialize {
                            context: format!("reviews page {page} for listing {listing_id}"),
                            source: e,
                        }
                    })
                }
            },
        )
        .await
    }
}

/// Maps 429 and other non-2xx statuses to typed errors.
fn check_status(response: &reqwest::Response, url: &str) -> Result<(), ScraperError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(ScraperError::RateLimited {
            domain: origin::extract_domain(url),
            retry_after_secs,
        });
    }

    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
