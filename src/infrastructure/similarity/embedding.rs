//! Gemini embedding-based similarity scorer

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::similarity::{SimilarityReport, SimilarityScorer, cosine_similarity};
use crate::domain::{CredentialStore, DomainError};
use crate::infrastructure::http_client::HttpClientTrait;
use crate::infrastructure::llm::DEFAULT_GEMINI_BASE_URL;

pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Embeds both texts and reports their cosine similarity.
///
/// Built once at startup and shared; holds no per-call state.
#[derive(Debug)]
pub struct EmbeddingSimilarityScorer<C: HttpClientTrait> {
    client: C,
    credentials: CredentialStore,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> EmbeddingSimilarityScorer<C> {
    pub fn new(client: C, credentials: CredentialStore) -> Self {
        Self::with_base_url(
            client,
            credentials,
            DEFAULT_GEMINI_BASE_URL,
            DEFAULT_EMBEDDING_MODEL,
        )
    }

    pub fn with_base_url(
        client: C,
        credentials: CredentialStore,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            credentials,
            base_url,
            model: model.into(),
        }
    }

    fn embed_url(&self) -> String {
        format!("{}/v1beta/models/{}:embedContent", self.base_url, self.model)
    }

    async fn embed(&self, api_key: &str, text: &str) -> Result<Vec<f32>, DomainError> {
        let body = serde_json::json!({
            "model": format!("models/{}", self.model),
            "content": { "parts": [{ "text": text }] },
        });

        let response = self
            .client
            .post_json(
                &self.embed_url(),
                vec![
                    ("x-goog-api-key", api_key),
                    ("Content-Type", "application/json"),
                ],
                &body,
            )
            .await?;

        let parsed: EmbedResponse = serde_json::from_value(response).map_err(|e| {
            DomainError::backend("gemini", format!("Failed to parse embedding: {}", e))
        })?;

        Ok(parsed.embedding.values)
    }
}

#[async_trait]
impl<C: HttpClientTrait> SimilarityScorer for EmbeddingSimilarityScorer<C> {
    async fn score(&self, raw: &str, summary: &str) -> Result<SimilarityReport, DomainError> {
        let raw = raw.trim();
        let summary = summary.trim();
        let api_key = self.credentials.gemini_api_key().await?;

        let raw_embedding = self.embed(&api_key, raw).await?;
        let summary_embedding = self.embed(&api_key, summary).await?;

        let score = cosine_similarity(&raw_embedding, &summary_embedding);
        debug!(score, dimensions = raw_embedding.len(), "Computed summary similarity");

        Ok(SimilarityReport::new(score, raw, summary))
    }
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}
