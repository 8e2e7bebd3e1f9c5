//! Response cache trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::DomainError;

/// Freshness-bounded key-value store for finished analysis results
///
/// This trait uses JSON strings internally to be dyn-compatible.
/// Use the helper methods for typed lookup/store operations.
#[async_trait]
pub trait ResponseCache: Send + Sync + Debug {
    /// Returns the payload stored under `key` if it is still fresh.
    ///
    /// A stale entry is removed from the backing store and reported as absent.
    async fn lookup_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores `payload` under `key`, replacing any previous entry
    async fn store_raw(&self, key: &str, payload: &str) -> Result<(), DomainError>;

    /// Removes every entry, returning how many were deleted
    async fn clear(&self) -> Result<usize, DomainError>;
}

/// Extension trait providing typed lookup/store operations
pub trait ResponseCacheExt: ResponseCache {
    /// Looks up and deserializes a value
    fn lookup<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.lookup_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::cache_io(format!("Failed to deserialize cache entry: {}", e))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Serializes and stores a value
    fn store<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Send + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::cache_io(format!("Failed to serialize cache entry: {}", e))
            })?;
            self.store_raw(key, &data).await
        }
    }
}

// Blanket implementation for all types implementing ResponseCache
impl<T: ResponseCache + ?Sized> ResponseCacheExt for T {}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock cache for testing
    #[derive(Debug, Default)]
    pub struct MockCache {
        entries: Mutex<HashMap<String, String>>,
        error: Mutex<Option<String>>,
    }

    impl MockCache {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_entry<V: Serialize>(self, key: &str, value: &V) -> Self {
            let json = serde_json::to_string(value).unwrap();
            self.entries.lock().unwrap().insert(key.to_string(), json);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::cache_io(error));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ResponseCache for MockCache {
        async fn lookup_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
            self.check_error()?;
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn store_raw(&self, key: &str, payload: &str) -> Result<(), DomainError> {
            self.check_error()?;
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), payload.to_string());
            Ok(())
        }

        async fn clear(&self) -> Result<usize, DomainError> {
            self.check_error()?;
            let mut entries = self.entries.lock().unwrap();
            let count = entries.len();
            entries.clear();
            Ok(count)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_cache_store_lookup() {
            let cache = MockCache::new();
            cache.store("key1", &"value1").await.unwrap();

            let result: Option<String> = cache.lookup("key1").await.unwrap();
            assert_eq!(result, Some("value1".to_string()));
        }

        #[tokio::test]
        async fn test_mock_cache_with_error() {
            let cache = MockCache::new().with_error("disk full");

            let result: Result<Option<String>, _> = cache.lookup("key").await;
            assert!(matches!(result, Err(DomainError::CacheIo { .. })));
        }

        #[tokio::test]
        async fn test_lookup_rejects_wrong_shape() {
            let cache = MockCache::new().with_entry("key", &vec![1, 2, 3]);

            let result: Result<Option<String>, _> = cache.lookup("key").await;
            assert!(result.is_err());
        }
    }
}
