//! Profile analysis endpoints

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{AnalyzeProfileRequest, ApiError, ClearCacheResponse, Json};
use crate::infrastructure::services::AnalysisReport;

/// POST /api/analyze-profile
pub async fn analyze_profile(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(body): Json<AnalyzeProfileRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let identity = peer.ip().to_string();
    info!(client = %identity, url = %body.url, "Analyze profile request");

    let report = state.analysis.analyze(&identity, body.into()).await?;

    Ok(Json(report))
}

/// POST /api/clear-cache
pub async fn clear_cache(
    State(state): State<AppState>,
) -> Result<Json<ClearCacheResponse>, ApiError> {
    let removed = state.analysis.clear_cache().await?;

    Ok(Json(ClearCacheResponse {
        message: "Cache cleared successfully".to_string(),
        removed,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::api::state::test_support::{FIXTURE_LOCATOR, state_with};
    use crate::domain::ProfileSource;
    use crate::domain::llm::MockLlmProvider;

    fn peer(port: u16) -> ConnectInfo<SocketAddr> {
        ConnectInfo(SocketAddr::from(([10, 0, 0, 7], port)))
    }

    fn body(url: &str) -> Json<AnalyzeProfileRequest> {
        Json(AnalyzeProfileRequest {
            url: url.to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_analyze_fixture_profile() {
        let state = state_with(MockLlmProvider::new().with_fallback("# John Doe"));

        let Json(report) = analyze_profile(State(state), peer(4000), body(FIXTURE_LOCATOR))
            .await
            .unwrap();

        assert_eq!(report.summary, "# John Doe");
        assert_eq!(report.source, ProfileSource::Fixture);
    }

    #[tokio::test]
    async fn test_missing_url_is_bad_request() {
        let state = state_with(MockLlmProvider::new().with_fallback("summary"));

        let err = analyze_profile(State(state), peer(4000), body(""))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.message, "No URL provided");
    }

    #[tokio::test]
    async fn test_same_address_is_rate_limited_across_ports() {
        let state = state_with(MockLlmProvider::new().with_fallback("summary"));

        analyze_profile(State(state.clone()), peer(4000), body(FIXTURE_LOCATOR))
            .await
            .unwrap();
        let err = analyze_profile(State(state), peer(4001), body(FIXTURE_LOCATOR))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert!(err.retry_after.is_some_and(|s| s >= 59));
    }

    #[tokio::test]
    async fn test_live_profile_without_credentials() {
        let state = state_with(MockLlmProvider::new().with_fallback("summary"));

        let err = analyze_profile(
            State(state),
            peer(4000),
            body("https://www.linkedin.com/in/jane"),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.message, "Gemini API key not configured");
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let state = state_with(MockLlmProvider::new().with_fallback("summary"));
        analyze_profile(State(state.clone()), peer(4000), body(FIXTURE_LOCATOR))
            .await
            .unwrap();

        let Json(response) = clear_cache(State(state)).await.unwrap();

        assert_eq!(response.message, "Cache cleared successfully");
        assert_eq!(response.removed, 1);
    }
}
