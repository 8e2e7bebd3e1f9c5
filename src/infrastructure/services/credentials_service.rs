use tracing::info;

use crate::domain::credentials::mask_email;
use crate::domain::{CredentialStore, DomainError, LinkedinCredentials};

/// Runtime credential updates from clients
#[derive(Debug, Clone)]
pub struct CredentialsService {
    store: CredentialStore,
}

impl CredentialsService {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Replaces the stored login and API key; every value must be non-empty
    pub async fn set_credentials(
        &self,
        linkedin_email: &str,
        linkedin_password: &str,
        gemini_api_key: &str,
    ) -> Result<(), DomainError> {
        let email = linkedin_email.trim();
        let api_key = gemini_api_key.trim();

        if email.is_empty() || linkedin_password.is_empty() || api_key.is_empty() {
            return Err(DomainError::validation("All credentials are required"));
        }

        self.store
            .set_linkedin(LinkedinCredentials::new(email, linkedin_password))
            .await;
        self.store.set_gemini_api_key(api_key).await;

        info!(email = %mask_email(email), "Credentials updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_credentials_populates_store() {
        let service = CredentialsService::new(CredentialStore::default());

        service
            .set_credentials(" jane@example.com ", "hunter2", "AIzaSyTest")
            .await
            .unwrap();

        let linkedin = service.store().linkedin().await.unwrap();
        assert_eq!(linkedin.email, "jane@example.com");
        assert_eq!(linkedin.password, "hunter2");
        assert_eq!(service.store().gemini_api_key().await.unwrap(), "AIzaSyTest");
    }

    #[tokio::test]
    async fn test_missing_value_is_rejected_and_store_untouched() {
        let service = CredentialsService::new(CredentialStore::default());

        let result = service
            .set_credentials("jane@example.com", "", "AIzaSyTest")
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(service.store().gemini_api_key().await.is_err());
    }
}
