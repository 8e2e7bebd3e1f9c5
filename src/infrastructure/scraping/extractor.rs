use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::profile::NOT_AVAILABLE;
use crate::domain::{DomainError, PageSession};

/// Timeouts and pacing shared by every section
#[derive(Debug, Clone, Copy)]
pub struct SectionTiming {
    pub navigation_timeout: Duration,
    pub selector_timeout: Duration,
    pub scroll_pause: Duration,
}

impl Default for SectionTiming {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(30),
            selector_timeout: Duration::from_secs(30),
            scroll_pause: Duration::from_secs(2),
        }
    }
}

/// One structural part of a profile.
///
/// `extract` may fail; callers go through [`run_section`], which turns any
/// failure into the section's default value.
#[async_trait]
pub trait SectionExtractor: Send + Sync + Debug {
    type Output: Default + Send;

    fn section(&self) -> &'static str;

    async fn extract(
        &self,
        page: &dyn PageSession,
        profile_url: &str,
    ) -> Result<Self::Output, DomainError>;
}

/// Runs `extractor`, degrading any failure to an empty section
pub async fn run_section<E: SectionExtractor>(
    extractor: &E,
    page: &dyn PageSession,
    profile_url: &str,
) -> E::Output {
    match extractor.extract(page, profile_url).await {
        Ok(output) => output,
        Err(e) => {
            warn!(section = extractor.section(), error = %e, "Section extraction failed");
            E::Output::default()
        }
    }
}

/// Termination policy for infinite-scroll pages
#[derive(Debug, Clone, Copy)]
pub struct ScrollPolicy {
    pub max_attempts: u32,
    pub pause: Duration,
    /// Stop early once this many elements match the selector
    pub item_cap: Option<(&'static str, usize)>,
}

impl ScrollPolicy {
    pub fn new(max_attempts: u32, pause: Duration) -> Self {
        Self {
            max_attempts,
            pause,
            item_cap: None,
        }
    }

    pub fn with_item_cap(mut self, selector: &'static str, cap: usize) -> Self {
        self.item_cap = Some((selector, cap));
        self
    }
}

/// Scrolls until the document height stops changing, the attempt budget is
/// spent or the item cap is reached. Returns the number of scrolls performed.
pub async fn scroll_until_settled(
    page: &dyn PageSession,
    policy: ScrollPolicy,
) -> Result<u32, DomainError> {
    let mut last_height = 0;
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        if let Some((selector, cap)) = policy.item_cap {
            if page.count(selector).await? >= cap {
                debug!(cap, "Item cap reached, stopping scroll");
                break;
            }
        }

        page.scroll_to_bottom().await?;
        sleep(policy.pause).await;
        attempts += 1;

        let new_height = page.scroll_height().await?;
        if new_height == last_height {
            break;
        }
        last_height = new_height;

        debug!(attempt = attempts, max = policy.max_attempts, height = new_height, "Scrolled");
    }

    Ok(attempts)
}

/// Navigates to `url`, waits for `container` and scrolls per `policy`,
/// returning the settled document
pub async fn load_scrolled_page(
    page: &dyn PageSession,
    url: &str,
    container: &str,
    timing: SectionTiming,
    policy: ScrollPolicy,
) -> Result<String, DomainError> {
    page.goto(url, timing.navigation_timeout).await?;
    page.wait_for_selector(container, timing.selector_timeout)
        .await?;
    scroll_until_settled(page, policy).await?;
    page.content().await
}

pub(crate) fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!(selector = css, error = ?e, "Invalid selector");
            None
        }
    }
}

/// Visible text with whitespace collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> String {
    if text.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        text
    }
}

/// Text of the `n`th descendant of `scope` matching `css`, or "N/A"
pub(crate) fn nth_text_in(scope: ElementRef<'_>, css: &str, n: usize) -> String {
    selector(css)
        .and_then(|sel| scope.select(&sel).nth(n).map(element_text))
        .map(non_empty)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Text of the first element in `document` matching `css`, or "N/A"
pub(crate) fn first_text(document: &Html, css: &str) -> String {
    selector(css)
        .and_then(|sel| document.select(&sel).next().map(element_text))
        .map(non_empty)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
