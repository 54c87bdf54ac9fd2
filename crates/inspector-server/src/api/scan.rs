//! Message and scan endpoints. Each request fetches the named listing once
//! and runs the scan against that static snapshot.

use axum::{extract::State, response::IntoResponse, Extension, Json};
use inspector_scan::{Request, Response};
use inspector_scraper::{ScraperError, StaticPage};
use serde::Deserialize;

use super::{ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

/// A UI message addressed to a page, e.g.
/// `{"type": "SCAN_LISTING", "url": "https://…", "analyze": true}`.
#[derive(Debug, Deserialize)]
pub(super) struct MessageBody {
    #[serde(flatten)]
    request: Request,
    url: String,
    #[serde(default)]
    analyze: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct ScanBody {
    url: String,
    #[serde(default)]
    analyze: bool,
}

pub(super) async fn handle_message(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<MessageBody>,
) -> Result<impl IntoResponse, ApiError> {
    let response = run(&state, &req_id, &body.url, body.request, body.analyze).await?;
    Ok(Json(ApiResponse::new(req_id.0, response)))
}

pub(super) async fn scan_listing(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ScanBody>,
) -> Result<impl IntoResponse, ApiError> {
    let response = run(&state, &req_id, &body.url, Request::ScanListing, body.analyze).await?;
    Ok(Json(ApiResponse::new(req_id.0, response)))
}

async fn run(
    state: &AppState,
    req_id: &RequestId,
    url: &str,
    request: Request,
    analyze: bool,
) -> Result<Response, ApiError> {
    let page = StaticPage::fetch(state.scanner.client(), url)
        .await
        .map_err(|e| map_fetch_error(req_id.0.clone(), &e))?;
    Ok(state.scanner.handle(&page, request, analyze).await)
}

fn map_fetch_error(request_id: String, error: &ScraperError) -> ApiError {
    match error {
        ScraperError::InvalidUrl { .. } => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        ScraperError::RateLimited { .. } => {
            ApiError::new(request_id, "rate_limited", error.to_string())
        }
        _ => {
            tracing::warn!(error = %error, "listing fetch failed");
            ApiError::new(request_id, "upstream_error", error.to_string())
        }
    }
}
