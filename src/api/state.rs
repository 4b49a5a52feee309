use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::{providers::TrackLookup, Recommender, Session};

/// Idle time after which a session is discarded unless configured otherwise
pub const DEFAULT_SESSION_TTL_SECS: i64 = 1800;

/// A stored session and the last time a request touched it
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub session: Session,
    pub touched_at: DateTime<Utc>,
}

impl SessionEntry {
    fn new(session: Session) -> Self {
        Self {
            session,
            touched_at: Utc::now(),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.touched_at > ttl
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated
    pub recommender: Arc<Recommender>,
    pub provider: Arc<dyn TrackLookup>,
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    pub session_ttl: Duration,
}

impl AppState {
    pub fn new(recommender: Recommender, provider: Arc<dyn TrackLookup>) -> Self {
        Self {
            recommender: Arc::new(recommender),
            provider,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            session_ttl: Duration::seconds(DEFAULT_SESSION_TTL_SECS),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Starts a new session in the search state, dropping any that went idle
    pub async fn create_session(&self) -> (Uuid, Session) {
        let id = Uuid::new_v4();
        let session = Session::new();
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now, self.session_ttl));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned = pruned, "Expired idle sessions");
        }

        sessions.insert(id, SessionEntry::new(session.clone()));
        (id, session)
    }

    /// Copies a session out so it can be advanced without holding the lock.
    ///
    /// An expired session is removed and reported as not found.
    pub async fn load_session(&self, id: Uuid) -> AppResult<Session> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| session_not_found(id))?;

        if entry.is_expired(now, self.session_ttl) {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "Session expired");
            return Err(session_not_found(id));
        }

        entry.touched_at = now;
        Ok(entry.session.clone())
    }

    pub async fn store_session(&self, id: Uuid, session: Session) {
        self.sessions
            .write()
            .await
            .insert(id, SessionEntry::new(session));
    }

    pub async fn remove_session(&self, id: Uuid) -> AppResult<()> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| session_not_found(id))
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("session {}", id))
}
