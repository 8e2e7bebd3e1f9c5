//! Application services composing the infrastructure pieces

mod analysis_service;
mod chat_service;
mod credentials_service;
mod summary_service;

pub use analysis_service::{AnalysisReport, AnalyzeRequest, ProfileAnalysisService};
pub use chat_service::{ChatService, ChatStarted, chat_context};
pub use credentials_service::CredentialsService;
pub use summary_service::{Summary, SummaryOptions, SummaryPromptBuilder, SummaryService};
