//! The `<KIND_N>` placeholder contract and per-kind counters.
//!
//! Placeholder syntax is the one bit-exact format shared with external
//! collaborators: angle brackets, an uppercase kind tag, an underscore, and a
//! 1-based integer. Tags may themselves contain underscores (`CREDIT_CARD`);
//! the index is always the part after the last one.

pub mod counters;
pub mod kind;
pub mod token;

pub use counters::PlaceholderCounters;
pub use kind::PiiKind;
pub use token::{find_placeholders, Placeholder, PlaceholderSpan};
