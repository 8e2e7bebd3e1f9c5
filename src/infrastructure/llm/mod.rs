//! Generative backend implementations

mod gemini;

pub use gemini::{DEFAULT_GEMINI_BASE_URL, GeminiProvider};
