use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

/// A single authenticated browsing context.
///
/// Implementations are not expected to be safe for concurrent multiplexed use;
/// every scrape run owns its page exclusively.
#[async_trait]
pub trait PageSession: Send + Sync + Debug {
    /// Navigate to `url`, failing with a navigation error after `timeout`
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DomainError>;

    /// Wait until at least one element matches `selector`
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
    -> Result<(), DomainError>;

    /// Scroll the viewport to the bottom of the document
    async fn scroll_to_bottom(&self) -> Result<(), DomainError>;

    /// Current `document.body.scrollHeight`
    async fn scroll_height(&self) -> Result<u64, DomainError>;

    /// Number of elements currently matching `selector`
    async fn count(&self, selector: &str) -> Result<usize, DomainError>;

    /// Rendered HTML of the current document
    async fn content(&self) -> Result<String, DomainError>;

    /// Type `value` into the element matching `selector`
    async fn fill(&self, selector: &str, value: &str) -> Result<(), DomainError>;

    /// Click the element matching `selector`
    async fn click(&self, selector: &str) -> Result<(), DomainError>;

    /// URL of the current document
    async fn current_url(&self) -> Result<String, DomainError>;

    /// Release the browsing context
    async fn close(&self) -> Result<(), DomainError>;
}

/// Factory for exclusive, short-lived browsing contexts
#[async_trait]
pub trait BrowserLauncher: Send + Sync + Debug {
    async fn launch(&self) -> Result<Box<dyn PageSession>, DomainError>;
}
