use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel value for a field that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";

/// Maximum number of posts kept per profile
pub const POSTS_CAP: usize = 15;

/// Top-of-page profile information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHeader {
    pub name: String,
    pub title: String,
    pub location: String,
}

impl ProfileHeader {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            location: location.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        self.name == NOT_AVAILABLE && self.title == NOT_AVAILABLE && self.location == NOT_AVAILABLE
    }
}

impl Default for ProfileHeader {
    fn default() -> Self {
        Self::new(NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE)
    }
}

/// A single position from the experience section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub location: String,
}

/// A single entry from the education section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub duration: String,
}

/// Aggregate of every section scraped from one profile.
///
/// Assembled once by the orchestrator and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordFields")]
pub struct ProfileRecord {
    header: ProfileHeader,
    experience: Vec<ExperienceEntry>,
    education: Vec<EducationEntry>,
    posts: Vec<String>,
}

/// Wire shape of [`ProfileRecord`]; decoding goes through [`ProfileRecord::new`]
#[derive(Deserialize)]
struct RecordFields {
    #[serde(default)]
    header: ProfileHeader,
    #[serde(default)]
    experience: Vec<ExperienceEntry>,
    #[serde(default)]
    education: Vec<EducationEntry>,
    #[serde(default)]
    posts: Vec<String>,
}

impl From<RecordFields> for ProfileRecord {
    fn from(fields: RecordFields) -> Self {
        Self::new(fields.header, fields.experience, fields.education, fields.posts)
    }
}

impl ProfileRecord {
    /// Builds a record, truncating posts to [`POSTS_CAP`]
    pub fn new(
        header: ProfileHeader,
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
        mut posts: Vec<String>,
    ) -> Self {
        posts.truncate(POSTS_CAP);

        Self {
            header,
            experience,
            education,
            posts,
        }
    }

    pub fn header(&self) -> &ProfileHeader {
        &self.header
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn posts(&self) -> &[String] {
        &self.posts
    }

    /// Plain-text rendering used as the summarization input and the chat context
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProfileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Profile Information ===")?;
        writeln!(f, "Name: {}", self.header.name)?;
        writeln!(f, "Title: {}", self.header.title)?;
        writeln!(f, "Location: {}", self.header.location)?;

        writeln!(f)?;
        writeln!(f, "=== Experience ===")?;
        if self.experience.is_empty() {
            writeln!(f, "{}", NOT_AVAILABLE)?;
        }
        for entry in &self.experience {
            writeln!(
                f,
                "- {} | {} | {} | {}",
                entry.title, entry.company, entry.duration, entry.location
            )?;
        }

        writeln!(f)?;
        writeln!(f, "=== Education ===")?;
        if self.education.is_empty() {
            writeln!(f, "{}", NOT_AVAILABLE)?;
        }
        for entry in &self.education {
            writeln!(f, "- {} | {} | {}", entry.school, entry.degree, entry.duration)?;
        }

        writeln!(f)?;
        writeln!(f, "=== Posts ===")?;
        if self.posts.is_empty() {
            writeln!(f, "{}", NOT_AVAILABLE)?;
        }
        for (index, post) in self.posts.iter().enumerate() {
            writeln!(f, "{}. {}", index + 1, post)?;
        }

        Ok(())
    }
}
