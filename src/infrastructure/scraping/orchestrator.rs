use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use super::education::EducationExtractor;
use super::experience::ExperienceExtractor;
use super::extractor::{SectionTiming, run_section};
use super::header::HeaderExtractor;
use super::posts::PostsExtractor;
use super::selectors::{
    LOGIN_EMAIL_INPUT, LOGIN_PASSWORD_INPUT, LOGIN_REJECTION_MARKERS, LOGIN_SUBMIT_BUTTON,
};
use crate::domain::credentials::mask_email;
use crate::domain::{BrowserLauncher, DomainError, LinkedinCredentials, PageSession, ProfileRecord};

/// Settings for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub base_url: String,
    pub timing: SectionTiming,
    /// Pause after submitting the login form
    pub login_settle: Duration,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.linkedin.com".to_string(),
            timing: SectionTiming::default(),
            login_settle: Duration::from_millis(1500),
        }
    }
}

/// Sequences the section extractors over one authenticated browsing context
#[derive(Debug)]
pub struct ScrapeOrchestrator {
    launcher: Arc<dyn BrowserLauncher>,
    settings: ScrapeSettings,
    header: HeaderExtractor,
    experience: ExperienceExtractor,
    education: EducationExtractor,
    posts: PostsExtractor,
}

impl ScrapeOrchestrator {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, mut settings: ScrapeSettings) -> Self {
        settings.base_url = settings.base_url.trim_end_matches('/').to_string();
        let timing = settings.timing;

        Self {
            launcher,
            settings,
            header: HeaderExtractor::new(timing),
            experience: ExperienceExtractor::new(timing),
            education: EducationExtractor::new(timing),
            posts: PostsExtractor::new(timing),
        }
    }

    /// Scrapes `profile_url` (already normalized with a trailing `/`).
    ///
    /// Fails only when the browser cannot be started or the login is not
    /// accepted; individual sections degrade to empty values. The browsing
    /// context is closed on every path.
    pub async fn scrape(
        &self,
        profile_url: &str,
        credentials: &LinkedinCredentials,
    ) -> Result<ProfileRecord, DomainError> {
        info!(profile_url = %profile_url, "Starting profile scrape");

        let page = self.launcher.launch().await?;
        let result = self.run(page.as_ref(), profile_url, credentials).await;

        if let Err(e) = page.close().await {
            warn!(error = %e, "Failed to close browser session");
        }

        result
    }

    async fn run(
        &self,
        page: &dyn PageSession,
        profile_url: &str,
        credentials: &LinkedinCredentials,
    ) -> Result<ProfileRecord, DomainError> {
        self.login(page, credentials).await?;

        let header = run_section(&self.header, page, profile_url).await;
        let experience = run_section(&self.experience, page, profile_url).await;
        let education = run_section(&self.education, page, profile_url).await;
        let posts = run_section(&self.posts, page, profile_url).await;

        info!(
            profile_url = %profile_url,
            experience = experience.len(),
            education = education.len(),
            posts = posts.len(),
            "Profile scrape finished"
        );

        Ok(ProfileRecord::new(header, experience, education, posts))
    }

    async fn login(
        &self,
        page: &dyn PageSession,
        credentials: &LinkedinCredentials,
    ) -> Result<(), DomainError> {
        info!(email = %mask_email(&credentials.email), "Logging in");

        let login_url = format!("{}/login", self.settings.base_url);
        page.goto(&login_url, self.settings.timing.navigation_timeout)
            .await?;

        let submit = async {
            page.fill(LOGIN_EMAIL_INPUT, &credentials.email).await?;
            page.fill(LOGIN_PASSWORD_INPUT, &credentials.password)
                .await?;
            page.click(LOGIN_SUBMIT_BUTTON).await
        };
        submit
            .await
            .map_err(|e| DomainError::authentication(format!("Login form unavailable: {}", e)))?;

        sleep(self.settings.login_settle).await;

        let landed_on = page.current_url().await?;
        if LOGIN_REJECTION_MARKERS
            .iter()
            .any(|marker| landed_on.contains(marker))
        {
            return Err(DomainError::authentication(format!(
                "Login was not accepted (ended on {})",
                landed_on
            )));
        }

        info!("Login successful");
        Ok(())
    }
}
