use serde::{Deserialize, Serialize};

use super::Message;

/// Text completion returned by a generative backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub model: String,
    pub message: Message,
}

impl LlmResponse {
    pub fn new(model: impl Into<String>, message: Message) -> Self {
        Self {
            model: model.into(),
            message,
        }
    }

    pub fn content(&self) -> &str {
        self.message.content_text()
    }
}
