//! Request, response and error types of the HTTP API

pub mod chat;
pub mod credentials;
pub mod error;
pub mod json;
pub mod profile;

pub use chat::{ChatInitRequest, ChatMessageRequest, ChatMessageResponse};
pub use credentials::{SetCredentialsRequest, StatusResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use profile::{AnalyzeProfileRequest, ClearCacheResponse};
