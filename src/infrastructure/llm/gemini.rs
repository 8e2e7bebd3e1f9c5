use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    CredentialStore, DomainError, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole,
};
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini `generateContent` provider.
///
/// The API key is read from the credential store on every call so keys set
/// at runtime take effect without rebuilding the provider.
#[derive(Debug)]
pub struct GeminiProvider<C: HttpClientTrait> {
    client: C,
    credentials: CredentialStore,
    base_url: String,
}

impl<C: HttpClientTrait> GeminiProvider<C> {
    pub fn new(client: C, credentials: CredentialStore) -> Self {
        Self::with_base_url(client, credentials, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        credentials: CredentialStore,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            credentials,
            base_url,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_request(&self, request: &LlmRequest) -> serde_json::Value {
        let contents: Vec<GeminiContent> = request
            .messages
            .iter()
            .map(GeminiContent::from_domain)
            .collect();

        serde_json::json!({ "contents": contents })
    }

    fn parse_response(&self, model: &str, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: GeminiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::backend("gemini", format!("Failed to parse response: {}", e))
        })?;

        let candidate = match response.candidates.into_iter().next() {
            Some(candidate) => candidate,
            None => {
                let reason = response
                    .prompt_feedback
                    .and_then(|f| f.block_reason)
                    .unwrap_or_else(|| "no candidates returned".to_string());
                return Err(DomainError::backend(
                    "gemini",
                    format!("Empty response: {}", reason),
                ));
            }
        };

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DomainError::backend(
                "gemini",
                "Response contained no text",
            ));
        }

        Ok(LlmResponse::new(
            response.model_version.unwrap_or_else(|| model.to_string()),
            Message::assistant(text),
        ))
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for GeminiProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let api_key = self.credentials.gemini_api_key().await?;

        let url = self.generate_url(model);
        let body = self.build_request(&request);

        debug!(model = %model, messages = request.messages.len(), "Calling Gemini");

        let response = self
            .client
            .post_json(
                &url,
                vec![
                    ("x-goog-api-key", api_key.as_str()),
                    ("Content-Type", "application/json"),
                ],
                &body,
            )
            .await
            .map_err(|e| match e {
                DomainError::Backend { message, .. } => DomainError::backend("gemini", message),
                other => other,
            })?;

        self.parse_response(model, response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn from_domain(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        };

        Self {
            role,
            parts: vec![GeminiPart {
                text: Some(message.content_text().to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credentials;
    use crate::infrastructure::http_client::mock::MockHttpClient;

    const TEST_URL: &str =
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

    fn store_with_key() -> CredentialStore {
        CredentialStore::new(Credentials {
            linkedin: None,
            gemini_api_key: Some("test-api-key".to_string()),
        })
    }

    fn text_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 7},
            "modelVersion": "gemini-2.0-flash"
        })
    }

    #[tokio::test]
    async fn test_gemini_chat() {
        let client = MockHttpClient::new().with_response(
            "POST",
            TEST_URL,
            text_response("A seasoned engineer."),
        );
        let provider = GeminiProvider::new(client, store_with_key());

        let request = LlmRequest::new(vec![
            Message::user("Summarize"),
            Message::assistant("Sure"),
            Message::user("Shorter please"),
        ]);
        let response = provider.chat("gemini-2.0-flash", request).await.unwrap();

        assert_eq!(response.content(), "A seasoned engineer.");
        assert_eq!(response.model, "gemini-2.0-flash");

        let sent = provider.client.requests_to("POST", TEST_URL);
        let body = sent[0].body.clone().unwrap();
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][2]["parts"][0]["text"], "Shorter please");
        assert!(
            sent[0]
                .headers
                .contains(&("x-goog-api-key".to_string(), "test-api-key".to_string()))
        );
    }

    #[tokio::test]
    async fn test_gemini_requires_api_key() {
        let client = MockHttpClient::new().with_response("POST", TEST_URL, text_response("x"));
        let provider = GeminiProvider::new(client, CredentialStore::default());

        let result = provider
            .chat("gemini-2.0-flash", LlmRequest::builder().user("hi").build())
            .await;

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
        assert!(provider.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_gemini_blocked_prompt_is_backend_error() {
        let client = MockHttpClient::new().with_response(
            "POST",
            TEST_URL,
            serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}}),
        );
        let provider = GeminiProvider::new(client, store_with_key());

        let err = provider
            .chat("gemini-2.0-flash", LlmRequest::builder().user("hi").build())
            .await
            .unwrap_err();

        match err {
            DomainError::Backend { provider, message } => {
                assert_eq!(provider, "gemini");
                assert!(message.contains("SAFETY"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_gemini_http_failure_is_backend_error() {
        let client = MockHttpClient::new().with_error("POST", TEST_URL, "HTTP 429: quota");
        let provider = GeminiProvider::new(client, store_with_key());

        let result = provider
            .chat("gemini-2.0-flash", LlmRequest::builder().user("hi").build())
            .await;

        assert!(matches!(result, Err(DomainError::Backend { .. })));
    }

    #[tokio::test]
    async fn test_gemini_custom_base_url() {
        let url = "http://localhost:8089/v1beta/models/gemini-pro:generateContent";
        let client = MockHttpClient::new().with_response("POST", url, text_response("ok"));
        let provider =
            GeminiProvider::with_base_url(client, store_with_key(), "http://localhost:8089/");

        provider
            .chat("gemini-pro", LlmRequest::builder().user("hi").build())
            .await
            .unwrap();

        let body = provider.client.requests()[0].body.clone().unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
        assert!(body.get("generationConfig").is_none());
    }
}
