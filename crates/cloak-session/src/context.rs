//! SessionContext: cumulative mapping, counters, and turn history of one
//! conversation.

use chrono::{DateTime, Utc};
use cloak_core::models::Turn;
use cloak_core::{MaskingState, PiiMapping};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    /// Every placeholder issued in this session plus the per-kind counters.
    pub state: MaskingState,
    /// Completed turns, oldest first.
    pub turns: Vec<Turn>,
    /// Queries received, including ones that failed.
    pub queries_made: u64,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            created_at: now,
            last_activity: now,
            state: MaskingState::new(),
            turns: Vec::new(),
            queries_made: 0,
        }
    }

    /// Record that a query arrived.
    pub fn record_query(&mut self) {
        self.queries_made += 1;
        self.last_activity = Utc::now();
    }

    /// Append a completed turn.
    pub fn record_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.last_activity = Utc::now();
    }

    /// The full session mapping.
    pub fn mapping(&self) -> &PiiMapping {
        &self.state.mapping
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Duration since last activity.
    pub fn idle_duration(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}
