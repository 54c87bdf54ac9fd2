//! Client for the external analysis backend.
//!
//! The backend is opaque: it receives the consolidated scan and returns an
//! enriched risk object plus optional per-analyzer results. Every response
//! field is optional so older or partial backends still parse.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ScanError;
use crate::message::ScanResponse;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    pub success: bool,
    pub results: AnalysisResults,
    pub risk: Option<AnalysisRisk>,
    pub analyzers_status: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw per-analyzer output, passed through for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResults {
    pub synthid: Option<Value>,
    pub sentiment: Option<Value>,
    pub image_similarity: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRisk {
    pub score: Option<f64>,
    pub level: Option<String>,
    pub color: Option<String>,
    pub warnings: Vec<String>,
    /// Points per category, e.g. `{"seller": 15, "images": 30}`.
    pub breakdown: BTreeMap<String, Value>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisHealth {
    pub status: Option<String>,
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    /// # Errors
    ///
    /// Returns [`ScanError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScanError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Posts the consolidated scan to `{base_url}/analyze`.
    ///
    /// # Errors
    ///
    /// - [`ScanError::Http`] on network failure.
    /// - [`ScanError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScanError::Deserialize`] when the body is not a JSON object.
    /// - [`ScanError::Rejected`] when the backend reports `success: false`.
    pub async fn analyze(&self, scan: &ScanResponse) -> Result<AnalysisResponse, ScanError> {
        let url = format!("{}/analyze", self.base_url);
        let response = self.client.post(&url).json(scan).send().await?;
        let body = Self::checked_body(response, &url).await?;

        let analysis: AnalysisResponse =
            serde_json::from_str(&body).map_err(|source| ScanError::Deserialize {
                context: url.clone(),
                source,
            })?;
        if !analysis.success {
            let reason = analysis
                .error
                .unwrap_or_else(|| "no reason given".to_owned());
            warn!(%url, %reason, "analysis backend reported failure");
            return Err(ScanError::Rejected(reason));
        }
        debug!(
            %url,
            warnings = analysis.risk.as_ref().map_or(0, |r| r.warnings.len()),
            "analysis backend responded"
        );
        Ok(analysis)
    }

    /// Probes `{base_url}/health`.
    ///
    /// # Errors
    ///
    /// Same as [`AnalysisClient::analyze`], minus [`ScanError::Rejected`].
    pub async fn health(&self) -> Result<AnalysisHealth, ScanError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        let body = Self::checked_body(response, &url).await?;
        serde_json::from_str(&body).map_err(|source| ScanError::Deserialize {
            context: url,
            source,
        })
    }

    async fn checked_body(response: reqwest::Response, url: &str) -> Result<String, ScanError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_backend_response_parses() {
        let json = r#"{
            "success": true,
            "results": {"synthid": {"is_ai_generated": true, "confidence": 87}},
            "risk": {"score": 62.5, "level": "HIGH", "warnings": ["AI image"], "breakdown": {"images": 30}},
            "analyzers_status": {"synthid": "READY"}
        }"#;
        let parsed: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert!(parsed.results.sentiment.is_none());
        let risk = parsed.risk.unwrap();
        assert_eq!(risk.level.as_deref(), Some("HIGH"));
        assert_eq!(risk.warnings, vec!["AI image"]);
        assert_eq!(risk.breakdown["images"], 30);
        assert!(risk.recommendation.is_none());
    }

    #[test]
    fn health_keeps_unknown_fields() {
        let parsed: AnalysisHealth =
            serde_json::from_str(r#"{"status":"healthy","synthid_ready":true}"#).unwrap();
        assert_eq!(parsed.status.as_deref(), Some("healthy"));
        assert_eq!(parsed.extra["synthid_ready"], true);
    }
}
