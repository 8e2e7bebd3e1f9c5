//! Profile scraping pipeline: section extractors and their orchestration

mod education;
mod experience;
mod extractor;
mod fixture;
mod header;
mod orchestrator;
mod posts;
pub mod selectors;

pub use education::{EDUCATION_MAX_SCROLLS, EducationExtractor};
pub use experience::{EXPERIENCE_MAX_SCROLLS, ExperienceExtractor};
pub use extractor::{
    ScrollPolicy, SectionExtractor, SectionTiming, run_section, scroll_until_settled,
};
pub use fixture::fixture_profile;
pub use header::HeaderExtractor;
pub use orchestrator::{ScrapeOrchestrator, ScrapeSettings};
pub use posts::{POSTS_MAX_SCROLLS, PostsExtractor};
