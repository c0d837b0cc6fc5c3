//! Per-participant session state.
//!
//! Sessions are created lazily on first contact and live for the process
//! lifetime. Ordering guarantees come from the pipeline dispatcher
//! (one worker per participant); the per-session mutex covers concurrent
//! reads from the REST shell.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::intake::Stage;

/// Mutable per-participant state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Current registration stage.
    pub stage: Stage,
    /// Consecutive garbage-input counter; drives the strict-reply tiers.
    pub invalid_count: u32,
    /// Last detected post-registration topic. Informational only.
    pub last_topic: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count another garbage input and return the new total.
    pub fn increment_invalid(&mut self) -> u32 {
        self.invalid_count += 1;
        self.invalid_count
    }

    /// Clear the garbage counter on acceptable input.
    pub fn reset_invalid(&mut self) {
        self.invalid_count = 0;
    }
}

/// In-memory session map keyed by participant id.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Get the session for `participant_id`, creating it with default state
    /// on first contact. Idempotent.
    pub async fn get_or_create(&self, participant_id: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(participant_id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(participant_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new()))),
        )
    }

    /// Point-in-time copy of a session, if one exists.
    pub async fn snapshot(&self, participant_id: &str) -> Option<Session> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(participant_id).map(Arc::clone)
        }?;
        let session = session.lock().await;
        Some(session.clone())
    }

    /// Number of known participants.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_or_create_is_idempotent() {
        let store = SessionStore::new();
        let a = store.get_or_create("42").await;
        let b = store.get_or_create("42").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn new_session_has_default_state() {
        let store = SessionStore::new();
        let session = store.get_or_create("42").await;
        let session = session.lock().await;
        assert_eq!(session.stage, Stage::Start);
        assert_eq!(session.invalid_count, 0);
        assert!(session.last_topic.is_none());
    }

    #[tokio::test]
    async fn distinct_participants_get_distinct_sessions() {
        let store = SessionStore::new();
        let a = store.get_or_create("1").await;
        let b = store.get_or_create("2").await;
        assert!(!Arc::ptr_eq(&a, &b));

        a.lock().await.stage = Stage::Complete;
        assert_eq!(b.lock().await.stage, Stage::Start);
    }

    #[tokio::test]
    async fn invalid_counter_increments_and_resets() {
        let mut session = Session::new();
        assert_eq!(session.increment_invalid(), 1);
        assert_eq!(session.increment_invalid(), 2);
        assert_eq!(session.increment_invalid(), 3);
        session.reset_invalid();
        assert_eq!(session.invalid_count, 0);
        assert_eq!(session.increment_invalid(), 1);
    }

    #[tokio::test]
    async fn snapshot_copies_current_state() {
        let store = SessionStore::new();
        assert!(store.snapshot("42").await.is_none());

        let session = store.get_or_create("42").await;
        session.lock().await.stage = Stage::AwaitingBirthday;

        let snap = store.snapshot("42").await.unwrap();
        assert_eq!(snap.stage, Stage::AwaitingBirthday);
    }
}
