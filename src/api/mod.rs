//! API layer - HTTP endpoints

pub mod health;
pub mod router;
pub mod routes;
pub mod state;
pub mod types;

pub use router::{cors_layer, create_router};
pub use state::AppState;
