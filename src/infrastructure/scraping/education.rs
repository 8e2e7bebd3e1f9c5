use async_trait::async_trait;
use scraper::Html;
use tracing::info;

use super::extractor::{
    ScrollPolicy, SectionExtractor, SectionTiming, load_scrolled_page, nth_text_in, selector,
};
use super::selectors::{
    DETAILS_CONTAINER, DETAILS_ITEM, EDUCATION_PATH, ITEM_CAPTION, ITEM_HEADLINE, ITEM_SUBTITLE,
};
use crate::domain::{DomainError, EducationEntry, PageSession};

pub const EDUCATION_MAX_SCROLLS: u32 = 5;

/// Schools from the education detail page
#[derive(Debug, Clone)]
pub struct EducationExtractor {
    timing: SectionTiming,
}

impl EducationExtractor {
    pub fn new(timing: SectionTiming) -> Self {
        Self { timing }
    }
}

#[async_trait]
impl SectionExtractor for EducationExtractor {
    type Output = Vec<EducationEntry>;

    fn section(&self) -> &'static str {
        "education"
    }

    async fn extract(
        &self,
        page: &dyn PageSession,
        profile_url: &str,
    ) -> Result<Vec<EducationEntry>, DomainError> {
        let url = format!("{}{}", profile_url, EDUCATION_PATH);
        let policy = ScrollPolicy::new(EDUCATION_MAX_SCROLLS, self.timing.scroll_pause);

        let html = load_scrolled_page(page, &url, DETAILS_CONTAINER, self.timing, policy).await?;
        let entries = parse_education(&html);

        info!(count = entries.len(), "Scraped education entries");
        Ok(entries)
    }
}

pub(crate) fn parse_education(html: &str) -> Vec<EducationEntry> {
    let document = Html::parse_document(html);
    let Some(item) = selector(DETAILS_ITEM) else {
        return Vec::new();
    };

    document
        .select(&item)
        .map(|element| EducationEntry {
            school: nth_text_in(element, ITEM_HEADLINE, 0),
            degree: nth_text_in(element, ITEM_SUBTITLE, 0),
            duration: nth_text_in(element, ITEM_CAPTION, 0),
        })
        .collect()
}
