//! Analysis request and response bodies

use serde::{Deserialize, Serialize};

use crate::infrastructure::services::{AnalyzeRequest, SummaryOptions};

/// Body of `POST /api/analyze-profile`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeProfileRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub custom_prompt: Option<String>,
    #[serde(default)]
    pub summary_options: SummaryOptions,
}

impl From<AnalyzeProfileRequest> for AnalyzeRequest {
    fn from(body: AnalyzeProfileRequest) -> Self {
        AnalyzeRequest {
            url: body.url,
            custom_prompt: body.custom_prompt,
            summary_options: body.summary_options,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    pub message: String,
    pub removed: usize,
}
