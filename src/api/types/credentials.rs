//! Credential update bodies

use serde::{Deserialize, Serialize};

use crate::domain::credentials::mask_email;

/// Body of `POST /api/set-credentials`
#[derive(Clone, Default, Deserialize)]
pub struct SetCredentialsRequest {
    #[serde(default)]
    pub linkedin_email: String,
    #[serde(default)]
    pub linkedin_password: String,
    #[serde(default)]
    pub gemini_api_key: String,
}

impl std::fmt::Debug for SetCredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetCredentialsRequest")
            .field("linkedin_email", &mask_email(&self.linkedin_email))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}
