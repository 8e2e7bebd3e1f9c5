use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::{DomainError, Reply};
use crate::infrastructure::chat::SessionRegistry;

/// Confirmation returned when a chat session starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatStarted {
    pub session_id: String,
    pub message: String,
}

/// Builds the context block that seeds a conversation
pub fn chat_context(summary: &str, raw_data: &str) -> String {
    format!("Summary:\n{}\n\nRaw Profile Data:\n{}", summary, raw_data)
}

/// Follow-up conversations about an analyzed profile
#[derive(Debug, Clone)]
pub struct ChatService {
    registry: Arc<SessionRegistry>,
}

impl ChatService {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub async fn init_chat(&self, summary: &str, raw_data: &str) -> Result<ChatStarted, DomainError> {
        if summary.trim().is_empty() || raw_data.trim().is_empty() {
            return Err(DomainError::validation("Summary and raw data are required"));
        }

        let session_id = self
            .registry
            .create(&chat_context(summary, raw_data))
            .await?;

        Ok(ChatStarted {
            session_id,
            message: "Chat session initialized successfully".to_string(),
        })
    }

    /// One user turn; a backend failure still yields a [`Reply`]
    pub async fn send_message(&self, session_id: &str, message: &str) -> Result<Reply, DomainError> {
        if session_id.trim().is_empty() || message.trim().is_empty() {
            return Err(DomainError::validation("Session ID and message are required"));
        }

        let reply = self
            .registry
            .turn(session_id, message)
            .await
            .map_err(|e| match e {
                DomainError::NotFound { .. } => {
                    DomainError::not_found("Chat session not found or expired")
                }
                other => other,
            })?;

        info!(session_id = %session_id, generated = reply.is_generated(), "Chat turn completed");
        Ok(reply)
    }
}
