use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{Credentials, LinkedinCredentials};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub scraper: ScraperConfig,
    pub gemini: GeminiConfig,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,
    pub chat: ChatConfig,
    pub similarity: SimilarityConfig,
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origins; empty allows any
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Browser automation and extraction timing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub webdriver_url: String,
    pub base_url: String,
    pub headless: bool,
    pub navigation_timeout_secs: u64,
    pub selector_timeout_secs: u64,
    pub scroll_pause_millis: u64,
    pub login_settle_millis: u64,
    /// Locator that selects the synthetic profile; empty disables it
    pub fixture_locator: String,
}

impl ScraperConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn selector_timeout(&self) -> Duration {
        Duration::from_secs(self.selector_timeout_secs)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_millis)
    }

    pub fn login_settle(&self) -> Duration {
        Duration::from_millis(self.login_settle_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub directory: PathBuf,
    pub freshness_secs: u64,
}

impl CacheConfig {
    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub cooldown_secs: u64,
}

impl RateLimitConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl ChatConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Never zero, `tokio::time::interval` rejects it
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    pub enabled: bool,
}

/// Initial values for the in-process credential store
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub linkedin_email: Option<String>,
    pub linkedin_password: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl CredentialsConfig {
    /// Blank values count as absent; a login needs both email and password
    pub fn to_credentials(&self) -> Credentials {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let linkedin = match (present(&self.linkedin_email), present(&self.linkedin_password)) {
            (Some(email), Some(password)) => Some(LinkedinCredentials::new(email, password)),
            _ => None,
        };

        Credentials {
            linkedin,
            gemini_api_key: present(&self.gemini_api_key),
        }
    }
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("linkedin_email", &self.linkedin_email.is_some())
            .field("linkedin_password", &self.linkedin_password.is_some())
            .field("gemini_api_key", &self.gemini_api_key.is_some())
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            base_url: "https://www.linkedin.com".to_string(),
            headless: true,
            navigation_timeout_secs: 30,
            selector_timeout_secs: 30,
            scroll_pause_millis: 2000,
            login_settle_millis: 1500,
            fixture_locator: "1234".to_string(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("cache"),
            freshness_secs: 24 * 60 * 60,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { cooldown_secs: 60 }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 30 * 60,
            sweep_interval_secs: 60,
        }
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.rate_limit.cooldown(), Duration::from_secs(60));
        assert_eq!(config.cache.freshness(), Duration::from_secs(86_400));
        assert_eq!(config.chat.idle_timeout(), Duration::from_secs(1800));
        assert_eq!(config.scraper.fixture_locator, "1234");
        assert!(config.similarity.enabled);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": { "port": 9000 },
            "logging": { "format": "json" }
        }))
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
    }

    #[test]
    fn test_zero_sweep_interval_is_clamped() {
        let chat = ChatConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };

        assert_eq!(chat.sweep_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_credentials_seed() {
        let config = CredentialsConfig {
            linkedin_email: Some("jane@example.com".to_string()),
            linkedin_password: None,
            gemini_api_key: Some("  ".to_string()),
        };

        let credentials = config.to_credentials();
        assert!(credentials.linkedin.is_none());
        assert!(credentials.gemini_api_key.is_none());
    }

    #[test]
    fn test_credentials_debug_hides_values() {
        let credentials = CredentialsConfig {
            gemini_api_key: Some("AIzaSySecret".to_string()),
            ..Default::default()
        };

        assert!(!format!("{:?}", credentials).contains("AIzaSySecret"));
    }
}
