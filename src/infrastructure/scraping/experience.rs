use async_trait::async_trait;
use scraper::Html;
use tracing::info;

use super::extractor::{
    ScrollPolicy, SectionExtractor, SectionTiming, load_scrolled_page, nth_text_in, selector,
};
use super::selectors::{
    DETAILS_CONTAINER, DETAILS_ITEM, EXPERIENCE_PATH, ITEM_CAPTION, ITEM_HEADLINE,
    ITEM_LIGHT_TEXT, ITEM_SUBTITLE,
};
use crate::domain::{DomainError, ExperienceEntry, PageSession};

/// Scroll attempts on the experience detail page
pub const EXPERIENCE_MAX_SCROLLS: u32 = 5;

/// Positions from the experience detail page
#[derive(Debug, Clone)]
pub struct ExperienceExtractor {
    timing: SectionTiming,
}

impl ExperienceExtractor {
    pub fn new(timing: SectionTiming) -> Self {
        Self { timing }
    }
}

#[async_trait]
impl SectionExtractor for ExperienceExtractor {
    type Output = Vec<ExperienceEntry>;

    fn section(&self) -> &'static str {
        "experience"
    }

    async fn extract(
        &self,
        page: &dyn PageSession,
        profile_url: &str,
    ) -> Result<Vec<ExperienceEntry>, DomainError> {
        let url = format!("{}{}", profile_url, EXPERIENCE_PATH);
        let policy = ScrollPolicy::new(EXPERIENCE_MAX_SCROLLS, self.timing.scroll_pause);

        let html = load_scrolled_page(page, &url, DETAILS_CONTAINER, self.timing, policy).await?;
        let entries = parse_experience(&html);

        info!(count = entries.len(), "Scraped experience entries");
        Ok(entries)
    }
}

pub(crate) fn parse_experience(html: &str) -> Vec<ExperienceEntry> {
    let document = Html::parse_document(html);
    let Some(item) = selector(DETAILS_ITEM) else {
        return Vec::new();
    };

    document
        .select(&item)
        .map(|element| ExperienceEntry {
            title: nth_text_in(element, ITEM_HEADLINE, 0),
            company: nth_text_in(element, ITEM_SUBTITLE, 0),
            duration: nth_text_in(element, ITEM_CAPTION, 0),
            location: nth_text_in(element, ITEM_LIGHT_TEXT, 1),
        })
        .collect()
}
