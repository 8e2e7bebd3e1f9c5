//! Profile domain - scraped profile records and their provenance

mod record;
mod source;

pub use record::{
    EducationEntry, ExperienceEntry, NOT_AVAILABLE, POSTS_CAP, ProfileHeader, ProfileRecord,
};
pub use source::{ProfileData, ProfileLocator, ProfileSource};
