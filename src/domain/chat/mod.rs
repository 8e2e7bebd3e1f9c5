//! Conversation domain - sessions grounded in a scraped profile

mod session;

pub use session::{ConversationSession, Reply, seed_prompt};
