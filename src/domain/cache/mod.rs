//! Cache domain - freshness-bounded response caching

mod key;
mod repository;

pub use key::{CacheKeyGenerator, CacheKeyParams, ContentHashKeyGenerator, DEFAULT_VARIANT};
pub use repository::{ResponseCache, ResponseCacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
