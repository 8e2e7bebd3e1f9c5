use async_trait::async_trait;
use scraper::Html;
use tracing::info;

use super::extractor::{
    ScrollPolicy, SectionExtractor, SectionTiming, element_text, load_scrolled_page, selector,
};
use super::selectors::{ACTIVITY_PATH, POST_TEXT, POSTS_CONTAINER};
use crate::domain::profile::POSTS_CAP;
use crate::domain::{DomainError, PageSession};

pub const POSTS_MAX_SCROLLS: u32 = 10;

/// Recent posts from the activity feed, at most [`POSTS_CAP`]
#[derive(Debug, Clone)]
pub struct PostsExtractor {
    timing: SectionTiming,
}

impl PostsExtractor {
    pub fn new(timing: SectionTiming) -> Self {
        Self { timing }
    }
}

#[async_trait]
impl SectionExtractor for PostsExtractor {
    type Output = Vec<String>;

    fn section(&self) -> &'static str {
        "posts"
    }

    async fn extract(
        &self,
        page: &dyn PageSession,
        profile_url: &str,
    ) -> Result<Vec<String>, DomainError> {
        let url = format!("{}{}", profile_url, ACTIVITY_PATH);
        let policy = ScrollPolicy::new(POSTS_MAX_SCROLLS, self.timing.scroll_pause)
            .with_item_cap(POST_TEXT, POSTS_CAP);

        let html = load_scrolled_page(page, &url, POSTS_CONTAINER, self.timing, policy).await?;
        let posts = parse_posts(&html);

        info!(count = posts.len(), cap = POSTS_CAP, "Scraped posts");
        Ok(posts)
    }
}

pub(crate) fn parse_posts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Some(post) = selector(POST_TEXT) else {
        return Vec::new();
    };

    document
        .select(&post)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .take(POSTS_CAP)
        .collect()
}
