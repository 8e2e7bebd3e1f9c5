//! Infrastructure layer - External service implementations

pub mod browser;
pub mod cache;
pub mod chat;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod rate_limiter;
pub mod scraping;
pub mod services;
pub mod similarity;
