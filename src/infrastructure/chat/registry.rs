use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{ConversationSession, DomainError, LlmProvider, Reply};

/// Default idle time after which a session expires
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

pub type SharedSession = Arc<Mutex<ConversationSession>>;

/// Owns every live conversation and expires idle ones.
///
/// A session whose lock is held by an in-flight turn is never expired.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SharedSession>>,
    backend: Arc<dyn LlmProvider>,
    model: String,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(backend: Arc<dyn LlmProvider>, model: impl Into<String>, idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            backend,
            model: model.into(),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    pub async fn create(&self, context: &str) -> Result<String, DomainError> {
        self.create_at(context, Utc::now()).await
    }

    /// Seeds a new session and registers it under a fresh random id.
    ///
    /// Nothing is registered when the backend fails to answer the seed turn.
    pub async fn create_at(&self, context: &str, now: DateTime<Utc>) -> Result<String, DomainError> {
        let id = Uuid::new_v4().to_string();
        let session =
            ConversationSession::start(id.clone(), context, self.backend.as_ref(), &self.model, now)
                .await?;

        let mut sessions = self.sessions.write().await;
        match sessions.entry(id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(Mutex::new(session)));
            }
            Entry::Occupied(_) => {
                return Err(DomainError::internal("Session id collision"));
            }
        }

        info!(session_id = %id, active = sessions.len(), "Chat session created");
        Ok(id)
    }

    pub async fn lookup(&self, id: &str) -> Option<SharedSession> {
        self.lookup_at(id, Utc::now()).await
    }

    /// Returns the session unless it has expired at `now`, in which case it is
    /// removed in the same critical section
    pub async fn lookup_at(&self, id: &str, now: DateTime<Utc>) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get(id)?.clone();

        let expired = session
            .try_lock()
            .map(|guard| guard.is_expired(now, self.idle_timeout))
            .unwrap_or(false);

        if expired {
            sessions.remove(id);
            debug!(session_id = %id, "Chat session expired on lookup");
            return None;
        }

        Some(session)
    }

    pub async fn turn(&self, id: &str, message: &str) -> Result<Reply, DomainError> {
        self.turn_at(id, message, Utc::now()).await
    }

    /// Runs one turn on session `id`; missing and expired sessions are `NotFound`
    pub async fn turn_at(
        &self,
        id: &str,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<Reply, DomainError> {
        let session = self
            .lookup_at(id, now)
            .await
            .ok_or_else(|| DomainError::not_found("Invalid or expired session"))?;

        let mut guard = session.lock().await;

        // Another turn may have held the lock past the idle timeout
        if guard.is_expired(now, self.idle_timeout) {
            drop(guard);
            self.evict(id, &session).await;
            return Err(DomainError::not_found("Invalid or expired session"));
        }

        Ok(guard
            .turn(message, self.backend.as_ref(), &self.model, now)
            .await)
    }

    async fn evict(&self, id: &str, session: &SharedSession) {
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, session))
        {
            sessions.remove(id);
        }
    }

    pub async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now()).await
    }

    /// Removes every idle session, returning how many were dropped
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => !guard.is_expired(now, self.idle_timeout),
            Err(_) => true,
        });

        let removed = before - sessions.len();
        if removed > 0 {
            info!(removed, remaining = sessions.len(), "Swept idle chat sessions");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
