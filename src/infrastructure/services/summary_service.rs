//! Profile summarization

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::DomainError;
use crate::domain::llm::{LlmProvider, LlmRequest};

const ANALYSIS_INSTRUCTIONS: &str = "\
Please analyze this LinkedIn profile data and provide a comprehensive professional summary of \
the person. Include their current role, key achievements, career progression, educational \
background, and any notable patterns or expertise areas.

Format the response in markdown with:
- # for main sections
- ## for subsections
- bullet points for lists
- **bold** for emphasis on key points

Focus on:
1. Current role and responsibilities
2. Career progression and achievements
3. Educational background
4. Areas of expertise
5. Key skills and competencies
6. Notable patterns in their professional journey";

const CLOSING_INSTRUCTIONS: &str =
    "Please provide a well-structured, professional response using proper markdown formatting throughout.";

/// Optional one-liners requested ahead of the main summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    #[serde(default)]
    pub years_of_experience: bool,
    #[serde(default)]
    pub relevant_job_titles: bool,
    #[serde(default)]
    pub degrees_earned: bool,
}

impl SummaryOptions {
    /// Names of the enabled options in a fixed order
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("years_of_experience", self.years_of_experience),
            ("relevant_job_titles", self.relevant_job_titles),
            ("degrees_earned", self.degrees_earned),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }

    fn headline_instructions(&self) -> Vec<String> {
        [
            (self.years_of_experience, "years of experience", "Years of Experience"),
            (self.relevant_job_titles, "relevant job titles", "Relevant Job Titles"),
            (self.degrees_earned, "degrees earned", "Degrees Earned"),
        ]
        .into_iter()
        .filter(|(on, _, _)| *on)
        .map(|(_, topic, label)| {
            format!(
                "Before anything else, start your response with a one-line bold description of \
                 the {topic} of the person in the format \"{label}: <one-line description>\"."
            )
        })
        .collect()
    }
}

/// Composes the single prompt sent for a summary
#[derive(Debug, Clone, Default)]
pub struct SummaryPromptBuilder<'a> {
    custom_prompt: Option<&'a str>,
    options: SummaryOptions,
}

impl<'a> SummaryPromptBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom_prompt(mut self, prompt: Option<&'a str>) -> Self {
        self.custom_prompt = prompt.map(str::trim).filter(|p| !p.is_empty());
        self
    }

    pub fn options(mut self, options: SummaryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(&self, profile_data: &str) -> String {
        let mut prompt = String::from(ANALYSIS_INSTRUCTIONS);

        let headlines = self.options.headline_instructions();
        if !headlines.is_empty() {
            prompt.push_str("\n\nBefore the main summary:\n");
            prompt.push_str(&headlines.join("\n"));
        }

        if let Some(custom) = self.custom_prompt {
            prompt.push_str(
                "\n\nAdditionally, please make sure to take the following specific requirements \
                 into account in your analysis:\n",
            );
            prompt.push_str(custom);
        }

        prompt.push_str("\n\nHere's the LinkedIn data:\n");
        prompt.push_str(profile_data);
        prompt.push_str("\n\n");
        prompt.push_str(CLOSING_INSTRUCTIONS);

        prompt
    }
}

/// Result of a summarization call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    Generated(String),
    /// User-visible explanation of why no summary was produced
    Failed(String),
}

impl Summary {
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Failed(text) => text,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Turns rendered profile data into a narrative summary
#[derive(Debug, Clone)]
pub struct SummaryService {
    backend: Arc<dyn LlmProvider>,
    model: String,
}

impl SummaryService {
    pub fn new(backend: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    /// Never fails: backend errors come back as [`Summary::Failed`]
    pub async fn summarize(
        &self,
        profile_data: &str,
        custom_prompt: Option<&str>,
        options: SummaryOptions,
    ) -> Summary {
        let prompt = SummaryPromptBuilder::new()
            .custom_prompt(custom_prompt)
            .options(options)
            .build(profile_data);

        info!(
            model = %self.model,
            custom_prompt = custom_prompt.is_some(),
            options = ?options.enabled(),
            "Generating summary"
        );

        match self
            .backend
            .chat(&self.model, LlmRequest::builder().user(prompt).build())
            .await
        {
            Ok(response) => Summary::Generated(response.content().to_string()),
            Err(e) => {
                warn!(error = %e, "Summary generation failed");
                Summary::Failed(failure_message(&e))
            }
        }
    }
}

fn failure_message(error: &DomainError) -> String {
    match error {
        DomainError::Configuration { message } => format!("Error: {}", message),
        other => format!("Error generating summary: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    #[test]
    fn test_prompt_without_extras() {
        let prompt = SummaryPromptBuilder::new().build("=== Profile Information ===");

        assert!(prompt.starts_with("Please analyze this LinkedIn profile data"));
        assert!(prompt.contains("Here's the LinkedIn data:\n=== Profile Information ==="));
        assert!(prompt.ends_with(CLOSING_INSTRUCTIONS));
        assert!(!prompt.contains("Additionally"));
        assert!(!prompt.contains("Before the main summary"));
    }

    #[test]
    fn test_prompt_with_options_and_custom_requirements() {
        let options = SummaryOptions {
            years_of_experience: true,
            degrees_earned: true,
            ..Default::default()
        };
        let prompt = SummaryPromptBuilder::new()
            .custom_prompt(Some("  Focus on leadership  "))
            .options(options)
            .build("data");

        assert!(prompt.contains("\"Years of Experience: <one-line description>\""));
        assert!(prompt.contains("\"Degrees Earned: <one-line description>\""));
        assert!(!prompt.contains("Relevant Job Titles"));
        assert!(prompt.contains("into account in your analysis:\nFocus on leadership\n"));

        // Options come before the custom requirements, which come before the data
        let options_at = prompt.find("Years of Experience").unwrap();
        let custom_at = prompt.find("Focus on leadership").unwrap();
        let data_at = prompt.find("Here's the LinkedIn data").unwrap();
        assert!(options_at < custom_at && custom_at < data_at);
    }

    #[test]
    fn test_blank_custom_prompt_is_ignored() {
        let prompt = SummaryPromptBuilder::new()
            .custom_prompt(Some("   "))
            .build("data");

        assert!(!prompt.contains("Additionally"));
    }

    #[test]
    fn test_enabled_options() {
        let options: SummaryOptions =
            serde_json::from_str(r#"{"relevant_job_titles": true}"#).unwrap();

        assert_eq!(options.enabled(), vec!["relevant_job_titles"]);
        assert!(SummaryOptions::default().enabled().is_empty());
    }

    #[tokio::test]
    async fn test_summarize_sends_single_user_message() {
        let backend = Arc::new(MockLlmProvider::new().with_reply("# Jane Roe"));
        let service = SummaryService::new(backend.clone(), "gemini-2.0-flash");

        let summary = service
            .summarize("raw data", None, SummaryOptions::default())
            .await;

        assert_eq!(summary, Summary::Generated("# Jane Roe".to_string()));
        let requests = backend.requests();
        assert_eq!(requests[0].messages.len(), 1);
        assert!(requests[0].messages[0].content.contains("raw data"));
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_failed_summary() {
        let backend = Arc::new(MockLlmProvider::new().with_error("HTTP 503"));
        let service = SummaryService::new(backend, "gemini-2.0-flash");

        let summary = service
            .summarize("raw data", None, SummaryOptions::default())
            .await;

        assert!(!summary.is_generated());
        assert!(summary.text().starts_with("Error generating summary:"));
        assert!(summary.text().contains("HTTP 503"));
    }
}
