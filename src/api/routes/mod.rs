//! `/api` endpoints

pub mod chat;
pub mod credentials;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};

use super::health;
use super::state::AppState;

/// Routes mounted under `/api`
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/analyze-profile", post(profile::analyze_profile))
        .route("/clear-cache", post(profile::clear_cache))
        .route("/chat/init", post(chat::init_chat))
        .route("/chat/message", post(chat::send_message))
        .route("/set-credentials", post(credentials::set_credentials))
}
