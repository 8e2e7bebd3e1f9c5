//! Cache key derivation

use std::collections::BTreeMap;
use std::fmt::Debug;

use sha2::{Digest, Sha256};

/// Fingerprint used when no prompt variant is requested
pub const DEFAULT_VARIANT: &str = "default";

/// Trait for generating cache keys from input data
pub trait CacheKeyGenerator: Send + Sync + Debug {
    /// Generates a cache key from the given components
    fn generate(&self, params: &CacheKeyParams) -> String;
}

/// Parameters for cache key generation
#[derive(Debug, Clone, Default)]
pub struct CacheKeyParams {
    /// Source identifier (the profile locator)
    pub primary: String,
    /// Prompt-variant components (sorted for consistency)
    pub components: BTreeMap<String, String>,
}

impl CacheKeyParams {
    /// Creates new cache key parameters with a primary identifier
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            components: BTreeMap::new(),
        }
    }

    /// Adds a component to the key parameters
    pub fn with_component(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.components.insert(key.into(), value.into());
        self
    }

    /// Canonical prompt-variant fingerprint: `default` when no component is set.
    ///
    /// Every name and value is written as `<byte length>:<text>`, so no
    /// component value can imitate a component boundary.
    pub fn fingerprint(&self) -> String {
        if self.components.is_empty() {
            return DEFAULT_VARIANT.to_string();
        }

        self.components
            .iter()
            .flat_map(|(k, v)| [k, v])
            .map(|part| format!("{}:{}", part.len(), part))
            .collect()
    }
}

/// Content-hash key generator.
///
/// Keys are the SHA-256 of the source and fingerprint, so they are stable
/// across restarts and safe to use as file names.
#[derive(Debug, Clone, Default)]
pub struct ContentHashKeyGenerator;

impl ContentHashKeyGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CacheKeyGenerator for ContentHashKeyGenerator {
    fn generate(&self, params: &CacheKeyParams) -> String {
        let fingerprint = params.fingerprint();
        let mut hasher = Sha256::new();
        for part in [params.primary.as_str(), fingerprint.as_str()] {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part.as_bytes());
        }

        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_params_with_components() {
        let params = CacheKeyParams::new("https://example.com/in/jane/")
            .with_component("custom_prompt", "focus on leadership")
            .with_component("options", "degrees_earned");

        assert_eq!(params.components.len(), 2);
        assert_eq!(
            params.components.get("options"),
            Some(&"degrees_earned".to_string())
        );
    }

    #[test]
    fn test_fingerprint_defaults() {
        let params = CacheKeyParams::new("https://example.com/in/jane/");
        assert_eq!(params.fingerprint(), "default");
    }

    #[test]
    fn test_key_is_stable() {
        let generator = ContentHashKeyGenerator::new();
        let a = CacheKeyParams::new("url").with_component("custom_prompt", "p");
        let b = CacheKeyParams::new("url").with_component("custom_prompt", "p");

        let key = generator.generate(&a);
        assert_eq!(key, generator.generate(&b));
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_key_distinguishes_inputs() {
        let generator = ContentHashKeyGenerator::new();

        let plain = generator.generate(&CacheKeyParams::new("url"));
        let prompted =
            generator.generate(&CacheKeyParams::new("url").with_component("custom_prompt", "p"));
        let other_source = generator.generate(&CacheKeyParams::new("url2"));

        assert_ne!(plain, prompted);
        assert_ne!(plain, other_source);
    }

    #[test]
    fn test_components_are_sorted() {
        let a = CacheKeyParams::new("url")
            .with_component("zebra", "z")
            .with_component("apple", "a");
        let b = CacheKeyParams::new("url")
            .with_component("apple", "a")
            .with_component("zebra", "z");

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), "5:apple1:a5:zebra1:z");
    }

    #[test]
    fn test_prompt_cannot_imitate_options_component() {
        let generator = ContentHashKeyGenerator::new();

        let with_options = CacheKeyParams::new("url")
            .with_component("custom_prompt", "be brief")
            .with_component("options", "years_of_experience");
        let smuggled = CacheKeyParams::new("url").with_component(
            "custom_prompt",
            "be brief\u{1f}options=years_of_experience",
        );
        let shifted = CacheKeyParams::new("url")
            .with_component("custom_prompt", "be brief1:x")
            .with_component("options", "years_of_experience");

        assert_ne!(with_options.fingerprint(), smuggled.fingerprint());
        assert_ne!(generator.generate(&with_options), generator.generate(&smuggled));
        assert_ne!(generator.generate(&with_options), generator.generate(&shifted));
    }
}
