//! Application state shared by the handlers

use std::sync::Arc;

use crate::infrastructure::services::{ChatService, CredentialsService, ProfileAnalysisService};

#[derive(Debug, Clone)]
pub struct AppState {
    pub analysis: Arc<ProfileAnalysisService>,
    pub chat: ChatService,
    pub credentials: CredentialsService,
}

impl AppState {
    pub fn new(
        analysis: ProfileAnalysisService,
        chat: ChatService,
        credentials: CredentialsService,
    ) -> Self {
        Self {
            analysis: Arc::new(analysis),
            chat,
            credentials,
        }
    }
}
