//! Domain layer - Core business logic and entities

pub mod cache;
pub mod chat;
pub mod credentials;
pub mod error;
pub mod llm;
pub mod page;
pub mod profile;
pub mod similarity;

pub use cache::{CacheKeyGenerator, CacheKeyParams, ContentHashKeyGenerator, ResponseCache, ResponseCacheExt};
pub use chat::{ConversationSession, Reply};
pub use credentials::{CredentialStore, Credentials, LinkedinCredentials};
pub use error::DomainError;
pub use llm::{LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole};
pub use page::{BrowserLauncher, PageSession};
pub use profile::{
    EducationEntry, ExperienceEntry, ProfileData, ProfileHeader, ProfileLocator, ProfileRecord,
    ProfileSource,
};
pub use similarity::{SimilarityReport, SimilarityScorer};
