//! Profile analysis pipeline
//!
//! Rate limit gate, cache lookup, profile resolution, summary, similarity
//! and cache write, in that order.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::summary_service::{Summary, SummaryOptions, SummaryService};
use crate::domain::cache::{CacheKeyGenerator, CacheKeyParams, ContentHashKeyGenerator};
use crate::domain::{
    CredentialStore, DomainError, ProfileData, ProfileLocator, ProfileSource, ResponseCache,
    ResponseCacheExt, SimilarityReport, SimilarityScorer,
};
use crate::infrastructure::rate_limiter::RateLimiter;
use crate::infrastructure::scraping::{ScrapeOrchestrator, fixture_profile};

/// One request to analyze a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub url: String,
    pub custom_prompt: Option<String>,
    pub summary_options: SummaryOptions,
}

impl AnalyzeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = Some(prompt.into());
        self
    }

    pub fn with_summary_options(mut self, options: SummaryOptions) -> Self {
        self.summary_options = options;
        self
    }

    fn custom_prompt(&self) -> Option<&str> {
        self.custom_prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

/// Finished analysis, also the cached payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub raw_data: String,
    pub source: ProfileSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_analysis: Option<SimilarityReport>,
}

/// Orchestrates one analysis end to end
#[derive(Debug, Clone)]
pub struct ProfileAnalysisService {
    orchestrator: Arc<ScrapeOrchestrator>,
    summaries: SummaryService,
    scorer: Option<Arc<dyn SimilarityScorer>>,
    cache: Arc<dyn ResponseCache>,
    key_generator: ContentHashKeyGenerator,
    limiter: RateLimiter,
    credentials: CredentialStore,
    fixture_locator: Option<String>,
}

impl ProfileAnalysisService {
    pub fn new(
        orchestrator: Arc<ScrapeOrchestrator>,
        summaries: SummaryService,
        cache: Arc<dyn ResponseCache>,
        limiter: RateLimiter,
        credentials: CredentialStore,
    ) -> Self {
        Self {
            orchestrator,
            summaries,
            scorer: None,
            cache,
            key_generator: ContentHashKeyGenerator::new(),
            limiter,
            credentials,
            fixture_locator: None,
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn SimilarityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Locator that selects the built-in synthetic profile
    pub fn with_fixture_locator(mut self, token: impl Into<String>) -> Self {
        self.fixture_locator = Some(token.into()).filter(|t: &String| !t.is_empty());
        self
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub async fn analyze(
        &self,
        identity: &str,
        request: AnalyzeRequest,
    ) -> Result<AnalysisReport, DomainError> {
        let locator = ProfileLocator::parse(&request.url, self.fixture_locator.as_deref())?;

        self.limiter.admit(identity).await.into_result()?;

        let key = self.cache_key(&locator, &request);
        match self.cache.lookup::<AnalysisReport>(&key).await {
            Ok(Some(report)) => {
                info!(url = %request.url, "Serving analysis from cache");
                return Ok(report);
            }
            Ok(None) => debug!(url = %request.url, "Analysis cache miss"),
            Err(e) => warn!(error = %e, "Cache lookup failed, continuing without cache"),
        }

        let profile = self.resolve(&locator).await?;
        let raw_data = profile.record().render();

        let summary = self
            .summaries
            .summarize(&raw_data, request.custom_prompt(), request.summary_options)
            .await;

        let similarity_analysis = match &summary {
            Summary::Generated(text) => self.similarity(&raw_data, text).await,
            Summary::Failed(_) => None,
        };

        let report = AnalysisReport {
            summary: summary.text().to_string(),
            raw_data,
            source: profile.source(),
            similarity_analysis,
        };

        if summary.is_generated() {
            if let Err(e) = self.cache.store(&key, &report).await {
                warn!(error = %e, "Failed to cache analysis");
            }
        }

        Ok(report)
    }

    /// Removes every cached analysis, returning how many were dropped
    pub async fn clear_cache(&self) -> Result<usize, DomainError> {
        self.cache.clear().await
    }

    fn cache_key(&self, locator: &ProfileLocator, request: &AnalyzeRequest) -> String {
        let source = match locator {
            ProfileLocator::Url(url) => url.as_str(),
            ProfileLocator::Fixture => "fixture",
        };

        let mut params = CacheKeyParams::new(source);
        if let Some(prompt) = request.custom_prompt() {
            params = params.with_component("custom_prompt", prompt);
        }
        let options = request.summary_options.enabled();
        if !options.is_empty() {
            params = params.with_component("options", options.join(","));
        }

        self.key_generator.generate(&params)
    }

    async fn resolve(&self, locator: &ProfileLocator) -> Result<ProfileData, DomainError> {
        match locator {
            ProfileLocator::Fixture => {
                info!("Using synthetic profile");
                Ok(ProfileData::Fixture(fixture_profile()))
            }
            ProfileLocator::Url(url) => {
                self.credentials.gemini_api_key().await?;
                let credentials = self.credentials.linkedin().await?;

                let record = self.orchestrator.scrape(url, &credentials).await?;
                Ok(ProfileData::Scraped(record))
            }
        }
    }

    async fn similarity(&self, raw_data: &str, summary: &str) -> Option<SimilarityReport> {
        let scorer = self.scorer.as_ref()?;

        match scorer.score(raw_data, summary).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(error = %e, "Similarity scoring failed");
                None
            }
        }
    }
}
