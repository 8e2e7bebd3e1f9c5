use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::DomainError;

/// Login used to establish the authenticated browsing context
#[derive(Clone, PartialEq, Eq)]
pub struct LinkedinCredentials {
    pub email: String,
    pub password: String,
}

impl LinkedinCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LinkedinCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedinCredentials")
            .field("email", &mask_email(&self.email))
            .field("password", &"***")
            .finish()
    }
}

/// Snapshot of every secret the pipeline needs
#[derive(Clone, Default)]
pub struct Credentials {
    pub linkedin: Option<LinkedinCredentials>,
    pub gemini_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("linkedin", &self.linkedin)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_deref().map(mask_secret),
            )
            .finish()
    }
}

/// Shared, explicitly passed credential holder.
///
/// Cloning the store clones the handle, not the secrets.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Credentials>>,
}

impl CredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            inner: Arc::new(RwLock::new(credentials)),
        }
    }

    pub async fn snapshot(&self) -> Credentials {
        self.inner.read().await.clone()
    }

    pub async fn set_linkedin(&self, credentials: LinkedinCredentials) {
        info!(email = %mask_email(&credentials.email), "LinkedIn credentials set");
        self.inner.write().await.linkedin = Some(credentials);
    }

    pub async fn set_gemini_api_key(&self, api_key: impl Into<String>) {
        let api_key = api_key.into();
        info!(api_key = %mask_secret(&api_key), "Gemini API key set");
        self.inner.write().await.gemini_api_key = Some(api_key);
    }

    /// Returns the LinkedIn login or a configuration error when unset
    pub async fn linkedin(&self) -> Result<LinkedinCredentials, DomainError> {
        self.inner
            .read()
            .await
            .linkedin
            .clone()
            .filter(|c| !c.email.is_empty() && !c.password.is_empty())
            .ok_or_else(|| DomainError::configuration("LinkedIn credentials not set"))
    }

    /// Returns the Gemini API key or a configuration error when unset
    pub async fn gemini_api_key(&self) -> Result<String, DomainError> {
        self.inner
            .read()
            .await
            .gemini_api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| DomainError::configuration("Gemini API key not configured"))
    }
}

/// `jane.roe@example.com` -> `jan***com`
pub fn mask_email(email: &str) -> String {
    let chars: Vec<char> = email.chars().collect();

    if chars.len() <= 6 {
        return "***".to_string();
    }

    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 3..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Keeps the first five characters of a secret
pub fn mask_secret(secret: &str) -> String {
    let head: String = secret.chars().take(5).collect();
    format!("{}***", head)
}
