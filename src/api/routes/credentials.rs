//! Credential endpoint

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, SetCredentialsRequest, StatusResponse};

/// POST /api/set-credentials
pub async fn set_credentials(
    State(state): State<AppState>,
    Json(body): Json<SetCredentialsRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state
        .credentials
        .set_credentials(
            &body.linkedin_email,
            &body.linkedin_password,
            &body.gemini_api_key,
        )
        .await?;

    Ok(Json(StatusResponse::success("Credentials stored successfully")))
}
