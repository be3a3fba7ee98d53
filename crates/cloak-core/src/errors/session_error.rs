use super::error_code::{self, CloakErrorCode};

/// Session store errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A previous turn panicked while holding the session lock.
    #[error("session {session_id} lock poisoned")]
    Poisoned { session_id: String },
}

impl CloakErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Poisoned { .. } => error_code::SESSION_POISONED,
        }
    }
}
