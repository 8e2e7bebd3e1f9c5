//! Chat request and response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/init`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatInitRequest {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub raw_data: String,
}

/// Body of `POST /api/chat/message`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub response: String,
}
