//! # cloak-session
//!
//! Session-scoped masking state. Each conversation owns one
//! `SessionContext` behind its own lock; the `SessionManager` hands out
//! sessions concurrently.

pub mod context;
pub mod manager;
pub mod session;

pub use context::SessionContext;
pub use manager::SessionManager;
pub use session::Session;
