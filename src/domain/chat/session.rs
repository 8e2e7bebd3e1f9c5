use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::DomainError;
use crate::domain::llm::{LlmProvider, LlmRequest, Message};

/// Outcome of one conversational turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum Reply {
    /// The backend produced a reply and it was appended to the history
    Generated(String),
    /// The backend failed; the history is unchanged and the text explains why
    Failed(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Failed(text) => text,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Builds the synthetic first message that carries the profile context
pub fn seed_prompt(context: &str) -> String {
    format!(
        "You are an AI assistant helping to analyze and discuss a LinkedIn profile summary.\n\
         Here's the profile summary data to provide context for our conversation:\n\n\
         {context}\n\n\
         Keep your responses properly formatted in an intuitive paragraph style. Do not use bold \
         text, lists, asterisks or any other markdown symbols, including when you quote the data \
         provided.\n\
         Please help answer questions and provide insights about this profile. Keep your \
         responses professional and focused on the career and professional aspects discussed in \
         the summary."
    )
}

/// A conversation grounded in a scraped profile.
///
/// The history always starts with the seed turn followed by the backend's
/// acknowledgement and then strictly alternates user/assistant.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: String,
    turns: Vec<Message>,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Seeds a new session with `context` and obtains the first assistant turn.
    ///
    /// Fails without producing a session when the backend does not answer.
    pub async fn start(
        id: impl Into<String>,
        context: &str,
        backend: &dyn LlmProvider,
        model: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let seed = Message::user(seed_prompt(context));

        let response = backend
            .chat(model, LlmRequest::new(vec![seed.clone()]))
            .await?;

        debug!(session_id = %id, "Chat session seeded");

        Ok(Self {
            id,
            turns: vec![seed, Message::assistant(response.content())],
            created_at: now,
            last_active_at: now,
        })
    }

    /// Appends `message`, replays the whole history to the backend and appends the reply.
    ///
    /// On backend failure the user turn is rolled back so the history stays paired.
    pub async fn turn(
        &mut self,
        message: &str,
        backend: &dyn LlmProvider,
        model: &str,
        now: DateTime<Utc>,
    ) -> Reply {
        self.last_active_at = now;
        self.turns.push(Message::user(message));

        match backend
            .chat(model, LlmRequest::new(self.turns.clone()))
            .await
        {
            Ok(response) => {
                let text = response.content().to_string();
                self.turns.push(Message::assistant(text.clone()));
                Reply::Generated(text)
            }
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Chat turn failed");
                self.turns.pop();
                Reply::Failed(format!("Error generating response: {}", e))
            }
        }
    }

    /// Whether the session has been idle for longer than `timeout` at `now`
    pub fn is_expired(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        (now - self.last_active_at)
            .to_std()
            .map(|idle| idle > timeout)
            .unwrap_or(false)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{MessageRole, MockLlmProvider};

    const MODEL: &str = "gemini-2.0-flash";

    #[tokio::test]
    async fn test_start_seeds_history() {
        let backend = MockLlmProvider::new().with_reply("Ready to discuss.");
        let now = Utc::now();

        let session = ConversationSession::start("s1", "Summary: Jane", &backend, MODEL, now)
            .await
            .unwrap();

        assert_eq!(session.turns().len(), 2);
        assert_eq!(session.turns()[0].role, MessageRole::User);
        assert!(session.turns()[0].content.contains("Summary: Jane"));
        assert_eq!(session.turns()[1], Message::assistant("Ready to discuss."));
        assert_eq!(backend.requests()[0].messages.len(), 1);
    }

    #[tokio::test]
    async fn test_start_fails_without_reply() {
        let backend = MockLlmProvider::new().with_error("HTTP 503");

        let result = ConversationSession::start("s1", "ctx", &backend, MODEL, Utc::now()).await;

        assert!(matches!(result, Err(DomainError::Backend { .. })));
    }

    #[tokio::test]
    async fn test_turns_are_ordered() {
        let backend = MockLlmProvider::new()
            .with_reply("seed-response")
            .with_reply("response1")
            .with_reply("response2");
        let now = Utc::now();

        let mut session = ConversationSession::start("s1", "ctx", &backend, MODEL, now)
            .await
            .unwrap();
        session.turn("msg1", &backend, MODEL, now).await;
        session.turn("msg2", &backend, MODEL, now).await;

        let contents: Vec<_> = session.turns().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            &contents[1..],
            &["seed-response", "msg1", "response1", "msg2", "response2"]
        );
        assert!(contents[0].contains("ctx"));

        // The last request replays the entire history
        let last = backend.requests().pop().unwrap();
        assert_eq!(last.messages.len(), 5);
    }

    #[tokio::test]
    async fn test_failed_turn_rolls_back() {
        let backend = MockLlmProvider::new()
            .with_reply("seed-response")
            .with_error("quota exceeded");
        let now = Utc::now();

        let mut session = ConversationSession::start("s1", "ctx", &backend, MODEL, now)
            .await
            .unwrap();
        let reply = session.turn("hello", &backend, MODEL, now).await;

        assert!(!reply.is_generated());
        assert!(reply.text().contains("quota exceeded"));
        assert_eq!(session.turns().len(), 2);
    }

    #[tokio::test]
    async fn test_expiry_uses_last_activity() {
        let backend = MockLlmProvider::new().with_fallback("ok");
        let start = Utc::now();
        let timeout = Duration::from_secs(30 * 60);

        let mut session = ConversationSession::start("s1", "ctx", &backend, MODEL, start)
            .await
            .unwrap();
        assert!(!session.is_expired(start + chrono::Duration::minutes(30), timeout));
        assert!(session.is_expired(start + chrono::Duration::minutes(31), timeout));

        let later = start + chrono::Duration::minutes(20);
        session.turn("still here", &backend, MODEL, later).await;
        assert!(!session.is_expired(start + chrono::Duration::minutes(31), timeout));
    }
}
