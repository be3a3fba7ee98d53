//! SessionManager: concurrent per-session access via DashMap.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::Session;

/// Thread-safe session registry using `DashMap` for concurrent access.
pub struct SessionManager {
    sessions: Arc<DashMap<String, Arc<Session>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Create a session with a fresh random ID.
    pub fn create_session(&self) -> Arc<Session> {
        let id = Uuid::new_v4().to_string();
        let session = Arc::new(Session::new(id.clone()));
        self.sessions.insert(id.clone(), Arc::clone(&session));
        debug!(session_id = %id, "session created");
        session
    }

    /// The session named `session_id`, created empty if absent.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Session> {
        let entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Session::new(session_id)));
        Arc::clone(entry.value())
    }

    pub fn get_session(&self, session_id: &str) -> Option<Arc<Session>> {
        self.sessions.get(session_id).map(|r| Arc::clone(r.value()))
    }

    /// Remove a session. Callers still holding its `Arc` keep a usable
    /// handle; the manager just forgets it.
    pub fn remove_session(&self, session_id: &str) -> Option<Arc<Session>> {
        self.sessions.remove(session_id).map(|(_, v)| v)
    }

    /// Drop sessions idle for longer than `max_idle`, plus any whose lock is
    /// poisoned. Sessions mid-turn are kept. Returns how many were removed.
    pub fn remove_idle_sessions(&self, max_idle: chrono::Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| match session.try_lock() {
            Ok(Some(ctx)) => ctx.idle_duration() <= max_idle,
            Ok(None) => true,
            Err(_) => false,
        });
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!(removed, "idle sessions removed");
        }
        removed
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Get all session IDs.
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
