//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, CacheConfig, ChatConfig, CredentialsConfig, GeminiConfig, LogFormat,
    LoggingConfig, RateLimitConfig, ScraperConfig, ServerConfig, SimilarityConfig,
};
