//! Placeholder → original value mappings and the per-session masking state.

pub mod pii_mapping;
pub mod state;

pub use pii_mapping::PiiMapping;
pub use state::MaskingState;
