use serde::{Deserialize, Serialize};

use super::ProfileRecord;
use crate::domain::DomainError;

/// Where a profile should be read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLocator {
    /// A live profile page, normalized to end with `/`
    Url(String),
    /// The built-in synthetic profile used for demos and tests
    Fixture,
}

impl ProfileLocator {
    /// Classifies a client-supplied locator.
    ///
    /// `fixture_locator` is the configured token that selects the synthetic profile.
    pub fn parse(input: &str, fixture_locator: Option<&str>) -> Result<Self, DomainError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(DomainError::validation("No URL provided"));
        }

        if fixture_locator.is_some_and(|token| token == input) {
            return Ok(Self::Fixture);
        }

        if !input.starts_with("http://") && !input.starts_with("https://") {
            return Err(DomainError::validation(format!(
                "Profile URL must be absolute: {}",
                input
            )));
        }

        // Section pages are appended to the path, so query and fragment go
        let mut url = input
            .split(['?', '#'])
            .next()
            .unwrap_or(input)
            .to_string();
        if !url.ends_with('/') {
            url.push('/');
        }

        Ok(Self::Url(url))
    }
}

/// Provenance tag carried into responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    Scraped,
    Fixture,
}

/// A profile record tagged with how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileData {
    Scraped(ProfileRecord),
    Fixture(ProfileRecord),
}

impl ProfileData {
    pub fn record(&self) -> &ProfileRecord {
        match self {
            Self::Scraped(record) | Self::Fixture(record) => record,
        }
    }

    pub fn source(&self) -> ProfileSource {
        match self {
            Self::Scraped(_) => ProfileSource::Scraped,
            Self::Fixture(_) => ProfileSource::Fixture,
        }
    }
}
