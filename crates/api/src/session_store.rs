//! In-memory survey session store.
//!
//! Sessions are keyed by a random UUID that doubles as the respondent's
//! capability: whoever holds the id drives the session. Each session sits
//! behind its own async mutex so concurrent requests for the same session
//! run one at a time. Everything is lost on restart.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use exitsurvey_core::wizard::SurveySession;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

/// A session shared between the store and in-flight requests.
pub type SharedSession = Arc<Mutex<SurveySession>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Survey sessions with idle expiry.
///
/// Designed to be wrapped in `Arc` and shared through `AppState`.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Store a new session under a fresh id.
    pub async fn insert(&self, session: SurveySession) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(
            id,
            Entry {
                session: Arc::clone(&shared),
                last_seen: Instant::now(),
            },
        );
        (id, shared)
    }

    /// Look up a live session and refresh its idle timer.
    ///
    /// An expired session is removed and reported as missing.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let expired = match sessions.get_mut(&id) {
            None => return None,
            Some(entry) if now.duration_since(entry.last_seen) > self.idle_timeout => true,
            Some(entry) => {
                entry.last_seen = now;
                return Some(Arc::clone(&entry.session));
            }
        };
        if expired {
            sessions.remove(&id);
            tracing::debug!(session_id = %id, "Survey session expired");
        }
        None
    }

    /// Remove a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop every session idle for longer than the timeout.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.idle_timeout);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn a task that purges expired sessions every `every`.
pub fn start_session_sweeper(
    store: Arc<SessionStore>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = store.purge_expired().await;
            if purged > 0 {
                tracing::info!(purged, "Purged idle survey sessions");
            }
        }
    })
}
