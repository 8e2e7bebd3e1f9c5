//! Cache infrastructure - Cache implementations

mod file;

pub use file::{DEFAULT_FRESHNESS, FileCache};
