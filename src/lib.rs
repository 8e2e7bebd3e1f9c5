//! Profile Insight
//!
//! Scrapes a public profile through a WebDriver-controlled browser,
//! summarizes it with Gemini and serves follow-up chat about the result:
//! - Section extractors with bounded scroll-to-load-more
//! - File-backed response cache with a freshness window
//! - Per-client cooldown in front of the analysis pipeline
//! - Idle-expiring conversation sessions

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{CredentialStore, SimilarityScorer};
use infrastructure::{
    browser::{WebDriverLauncher, WebDriverOptions},
    cache::FileCache,
    chat::SessionRegistry,
    http_client::HttpClient,
    llm::GeminiProvider,
    rate_limiter::RateLimiter,
    scraping::{ScrapeOrchestrator, ScrapeSettings, SectionTiming},
    services::{ChatService, CredentialsService, ProfileAnalysisService, SummaryService},
    similarity::EmbeddingSimilarityScorer,
};
use tracing::info;

/// Wires every service from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let credentials = CredentialStore::new(config.credentials.to_credentials());

    let gemini_client = HttpClient::with_timeout(config.gemini.timeout())?;
    let backend = Arc::new(GeminiProvider::with_base_url(
        gemini_client.clone(),
        credentials.clone(),
        &config.gemini.base_url,
    ));

    let scraper = &config.scraper;
    // Leave room for the page-load timeout enforced by the driver itself
    let driver_client = HttpClient::with_timeout(scraper.navigation_timeout() * 2)?;
    let launcher = Arc::new(WebDriverLauncher::new(
        driver_client,
        WebDriverOptions {
            endpoint: scraper.webdriver_url.clone(),
            headless: scraper.headless,
            page_load_timeout: scraper.navigation_timeout(),
            ..Default::default()
        },
    ));
    let orchestrator = ScrapeOrchestrator::new(
        launcher,
        ScrapeSettings {
            base_url: scraper.base_url.clone(),
            timing: SectionTiming {
                navigation_timeout: scraper.navigation_timeout(),
                selector_timeout: scraper.selector_timeout(),
                scroll_pause: scraper.scroll_pause(),
            },
            login_settle: scraper.login_settle(),
        },
    );

    let cache = Arc::new(FileCache::new(
        config.cache.directory.clone(),
        config.cache.freshness(),
    ));

    let mut analysis = ProfileAnalysisService::new(
        Arc::new(orchestrator),
        SummaryService::new(backend.clone(), &config.gemini.model),
        cache,
        RateLimiter::new(config.rate_limit.cooldown()),
        credentials.clone(),
    )
    .with_fixture_locator(&scraper.fixture_locator);

    if config.similarity.enabled {
        let scorer: Arc<dyn SimilarityScorer> = Arc::new(EmbeddingSimilarityScorer::with_base_url(
            gemini_client,
            credentials.clone(),
            &config.gemini.base_url,
            &config.gemini.embedding_model,
        ));
        analysis = analysis.with_scorer(scorer);
    }

    let registry = SessionRegistry::new(backend, &config.gemini.model, config.chat.idle_timeout());

    info!(
        model = %config.gemini.model,
        webdriver = %scraper.webdriver_url,
        cache_dir = %config.cache.directory.display(),
        similarity = config.similarity.enabled,
        "Application state created"
    );

    Ok(AppState::new(
        analysis,
        ChatService::new(Arc::new(registry)),
        CredentialsService::new(credentials),
    ))
}
