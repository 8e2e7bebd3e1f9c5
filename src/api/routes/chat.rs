//! Chat endpoints

use axum::extract::State;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ChatInitRequest, ChatMessageRequest, ChatMessageResponse, Json};
use crate::infrastructure::services::ChatStarted;

/// POST /api/chat/init
pub async fn init_chat(
    State(state): State<AppState>,
    Json(body): Json<ChatInitRequest>,
) -> Result<Json<ChatStarted>, ApiError> {
    let started = state.chat.init_chat(&body.summary, &body.raw_data).await?;

    Ok(Json(started))
}

/// POST /api/chat/message
///
/// A failed generation is still a 200; the text explains the failure.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, ApiError> {
    let reply = state
        .chat
        .send_message(&body.session_id, &body.message)
        .await?;

    Ok(Json(ChatMessageResponse {
        response: reply.text().to_string(),
    }))
}
