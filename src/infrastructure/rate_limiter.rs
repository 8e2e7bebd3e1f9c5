//! Rate limiter implementation
//!
//! Single-slot cooldown per client identity: only the most recent accepted
//! request matters.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::DomainError;

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Rejected { wait_seconds: u64 },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Converts a rejection into [`DomainError::RateLimited`]
    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Rejected { wait_seconds } => Err(DomainError::rate_limited(wait_seconds)),
        }
    }
}

/// Cooldown gate keyed by client identity
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Last accepted request per identity
    records: Arc<RwLock<HashMap<String, Instant>>>,
    cooldown: Duration,
}

impl RateLimiter {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            cooldown,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub async fn admit(&self, identity: &str) -> Admission {
        self.admit_at(identity, Instant::now()).await
    }

    /// Check and record in one operation.
    ///
    /// An accepted request overwrites the identity's timestamp; a rejected one
    /// leaves it untouched.
    pub async fn admit_at(&self, identity: &str, now: Instant) -> Admission {
        let mut records = self.records.write().await;

        if let Some(last) = records.get(identity) {
            let elapsed = now.saturating_duration_since(*last);

            if elapsed < self.cooldown {
                let remaining = self.cooldown - elapsed;
                let wait_seconds = remaining.as_secs_f64().ceil().max(1.0) as u64;

                debug!(identity = %identity, wait_seconds, "Request rejected by cooldown");
                return Admission::Rejected { wait_seconds };
            }
        }

        records.insert(identity.to_string(), now);
        Admission::Allowed
    }

    pub async fn sweep(&self) -> usize {
        self.sweep_at(Instant::now()).await
    }

    /// Drops identities whose cooldown has already elapsed
    pub async fn sweep_at(&self, now: Instant) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|_, last| now.saturating_duration_since(*last) < self.cooldown);

        before - records.len()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_first_request_allowed() {
        let limiter = RateLimiter::new(COOLDOWN);

        assert!(limiter.admit("127.0.0.1").await.is_allowed());
    }

    #[tokio::test]
    async fn test_second_request_within_cooldown_rejected() {
        let limiter = RateLimiter::new(COOLDOWN);
        let start = Instant::now();

        assert_eq!(limiter.admit_at("a", start).await, Admission::Allowed);
        assert_eq!(
            limiter.admit_at("a", start + Duration::from_secs(10)).await,
            Admission::Rejected { wait_seconds: 50 }
        );
        assert_eq!(
            limiter.admit_at("a", start + COOLDOWN).await,
            Admission::Allowed
        );
    }

    #[tokio::test]
    async fn test_wait_hint_rounds_up() {
        let limiter = RateLimiter::new(COOLDOWN);
        let start = Instant::now();

        limiter.admit_at("a", start).await;
        let admission = limiter
            .admit_at("a", start + Duration::from_millis(59_500))
            .await;

        assert_eq!(admission, Admission::Rejected { wait_seconds: 1 });
    }

    #[tokio::test]
    async fn test_rejection_does_not_refresh_timestamp() {
        let limiter = RateLimiter::new(COOLDOWN);
        let start = Instant::now();

        limiter.admit_at("a", start).await;
        limiter.admit_at("a", start + Duration::from_secs(30)).await;

        assert!(
            limiter
                .admit_at("a", start + Duration::from_secs(61))
                .await
                .is_allowed()
        );
    }

    #[tokio::test]
    async fn test_identities_are_independent() {
        let limiter = RateLimiter::new(COOLDOWN);
        let start = Instant::now();

        limiter.admit_at("a", start).await;

        assert!(limiter.admit_at("b", start).await.is_allowed());
    }

    #[tokio::test]
    async fn test_sweep_removes_expired_records() {
        let limiter = RateLimiter::new(COOLDOWN);
        let start = Instant::now();

        limiter.admit_at("old", start).await;
        limiter
            .admit_at("recent", start + Duration::from_secs(50))
            .await;

        let removed = limiter.sweep_at(start + Duration::from_secs(70)).await;

        assert_eq!(removed, 1);
        assert_eq!(limiter.len().await, 1);
    }

    #[test]
    fn test_rejection_maps_to_domain_error() {
        let err = Admission::Rejected { wait_seconds: 42 }
            .into_result()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Please wait 42 seconds before making another request"
        );
    }
}
