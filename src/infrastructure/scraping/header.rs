use async_trait::async_trait;
use scraper::Html;
use tracing::info;

use super::extractor::{SectionExtractor, SectionTiming, first_text};
use super::selectors::{HEADER_CONTAINER, HEADER_LOCATION, HEADER_NAME, HEADER_TITLE};
use crate::domain::{DomainError, PageSession, ProfileHeader};

/// Name, headline and location from the top of the profile page
#[derive(Debug, Clone)]
pub struct HeaderExtractor {
    timing: SectionTiming,
}

impl HeaderExtractor {
    pub fn new(timing: SectionTiming) -> Self {
        Self { timing }
    }
}

#[async_trait]
impl SectionExtractor for HeaderExtractor {
    type Output = ProfileHeader;

    fn section(&self) -> &'static str {
        "header"
    }

    async fn extract(
        &self,
        page: &dyn PageSession,
        profile_url: &str,
    ) -> Result<ProfileHeader, DomainError> {
        page.goto(profile_url, self.timing.navigation_timeout)
            .await?;
        page.wait_for_selector(HEADER_CONTAINER, self.timing.selector_timeout)
            .await?;

        let html = page.content().await?;
        let header = parse_header(&html);

        info!(name = %header.name, "Scraped profile header");
        Ok(header)
    }
}

pub(crate) fn parse_header(html: &str) -> ProfileHeader {
    let document = Html::parse_document(html);

    ProfileHeader::new(
        first_text(&document, HEADER_NAME),
        first_text(&document, HEADER_TITLE),
        first_text(&document, HEADER_LOCATION),
    )
}
