use std::sync::{Mutex, MutexGuard, TryLockError};

use cloak_core::errors::SessionError;

use crate::context::SessionContext;

/// One conversation. Turns on the same session serialize on its lock;
/// distinct sessions never contend.
#[derive(Debug)]
pub struct Session {
    id: String,
    context: Mutex<SessionContext>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            context: Mutex::new(SessionContext::new(id.clone())),
            id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Exclusive access for the duration of a turn.
    pub fn lock(&self) -> Result<MutexGuard<'_, SessionContext>, SessionError> {
        self.context.lock().map_err(|_| self.poisoned())
    }

    /// Non-blocking variant of [`lock`](Self::lock). `Ok(None)` while another
    /// turn holds the session.
    pub fn try_lock(&self) -> Result<Option<MutexGuard<'_, SessionContext>>, SessionError> {
        match self.context.try_lock() {
            Ok(guard) => Ok(Some(guard)),
            Err(TryLockError::WouldBlock) => Ok(None),
            Err(TryLockError::Poisoned(_)) => Err(self.poisoned()),
        }
    }

    /// Cloned view of the current context.
    pub fn snapshot(&self) -> Result<SessionContext, SessionError> {
        self.lock().map(|ctx| ctx.clone())
    }

    fn poisoned(&self) -> SessionError {
        SessionError::Poisoned {
            session_id: self.id.clone(),
        }
    }
}
