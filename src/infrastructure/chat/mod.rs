//! Conversation session management

mod registry;

pub use registry::{DEFAULT_IDLE_TIMEOUT, SessionRegistry, SharedSession};
