//! Orchestrates one scan against a live page.

use std::sync::Arc;

use inspector_core::AppConfig;
use inspector_risk::{compute_risk, RiskRules};
use inspector_scraper::{
    acquire_reviews, extract_listing, open_reviews, AcquisitionConfig, AcquisitionContext, Clock,
    ExtractConfig, ListingClient, PageSession,
};
use tracing::{info, warn};

use crate::analysis::AnalysisClient;
use crate::error::ScanError;
use crate::message::{
    Assessment, FailedResponse, OpenReviewsResponse, Request, Response, ReviewFetch, ScanData,
    ScanResponse,
};

/// Holds the long-lived clients and the immutable extraction, acquisition
/// and scoring configuration shared by every scan.
pub struct Scanner {
    client: ListingClient,
    extract: ExtractConfig,
    acquisition: AcquisitionConfig,
    rules: RiskRules,
    analysis: Option<AnalysisClient>,
}

impl Scanner {
    #[must_use]
    pub fn new(client: ListingClient) -> Self {
        Self {
            client,
            extract: ExtractConfig::default(),
            acquisition: AcquisitionConfig::default(),
            rules: RiskRules::default(),
            analysis: None,
        }
    }

    /// Builds the HTTP clients from application config. The analysis client
    /// exists only when `analysis_url` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if either HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, ScanError> {
        let client = ListingClient::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
            clock,
        )?;
        let analysis = config
            .analysis_url
            .as_deref()
            .map(|url| AnalysisClient::new(url, config.request_timeout_secs, &config.user_agent))
            .transpose()?;

        Ok(Self {
            acquisition: AcquisitionConfig::from_app_config(config),
            analysis,
            ..Self::new(client)
        })
    }

    #[must_use]
    pub fn with_analysis(mut self, analysis: AnalysisClient) -> Self {
        self.analysis = Some(analysis);
        self
    }

    #[must_use]
    pub fn with_acquisition_config(mut self, acquisition: AcquisitionConfig) -> Self {
        self.acquisition = acquisition;
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RiskRules) -> Self {
        self.rules = rules;
        self
    }

    #[must_use]
    pub fn client(&self) -> &ListingClient {
        &self.client
    }

    #[must_use]
    pub fn analysis(&self) -> Option<&AnalysisClient> {
        self.analysis.as_ref()
    }

    /// Answers one message. Never fails: an unreadable page becomes
    /// `{ok: false, error}` for a scan and `{opened: false}` otherwise.
    pub async fn handle(
        &self,
        page: &dyn PageSession,
        request: Request,
        analyze: bool,
    ) -> Response {
        match request {
            Request::ScanListing => match self.scan(page, analyze).await {
                Ok(scan) => Response::Scan(Box::new(scan)),
                Err(e) => {
                    warn!(error = %e, "scan failed");
                    Response::Failed(FailedResponse::new(e.to_string()))
                }
            },
            Request::OpenReviews => {
                let opened = open_reviews(page).await.unwrap_or_else(|e| {
                    warn!(error = %e, "open reviews failed");
                    false
                });
                Response::OpenReviews(OpenReviewsResponse { opened })
            }
        }
    }

    /// Extracts, acquires reviews, scores and optionally enriches.
    ///
    /// Review acquisition and analysis failures are reported inside the
    /// response; only an unreadable page is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Scraper`] when the page URL or HTML cannot be
    /// read.
    pub async fn scan(
        &self,
        page: &dyn PageSession,
        analyze: bool,
    ) -> Result<ScanResponse, ScanError> {
        let url = page.url().await?;
        let html = page.html().await?;
        let listing = extract_listing(&html, &url, self.client.clock().now(), &self.extract);

        let ctx = AcquisitionContext {
            page,
            client: &self.client,
            config: &self.acquisition,
        };
        let acquisition = acquire_reviews(&ctx).await;
        let error = acquisition.failure_summary();

        let report = compute_risk(&listing, Some(acquisition.reviews.as_slice()), &self.rules);
        let assessment = Assessment::new(&listing, &acquisition.reviews, &report);
        info!(
            %url,
            source = %acquisition.source,
            reviews = acquisition.reviews.len(),
            risk_score = report.risk_score,
            "scan complete"
        );

        let mut response = ScanResponse {
            ok: true,
            url,
            data: ScanData {
                listing,
                reviews: acquisition.reviews,
                review_fetch: ReviewFetch {
                    source: acquisition.source,
                    diagnostics: acquisition.diagnostics,
                    error,
                },
            },
            report,
            assessment,
            analysis: None,
            analysis_error: None,
        };
        if analyze {
            self.enrich(&mut response).await;
        }
        Ok(response)
    }

    async fn enrich(&self, response: &mut ScanResponse) {
        let Some(analysis) = self.analysis.as_ref() else {
            response.analysis_error = Some("analysis backend not configured".to_owned());
            return;
        };
        match analysis.analyze(response).await {
            Ok(result) => response.analysis = Some(result),
            Err(e) => {
                warn!(error = %e, "analysis backend unavailable");
                response.analysis_error = Some(e.to_string());
            }
        }
    }
}
