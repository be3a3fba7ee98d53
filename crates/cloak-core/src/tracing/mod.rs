//! Tracing initialization and span definitions.
//! `tracing` crate with `EnvFilter`, per-crate log levels via `CLOAK_LOG`.

pub mod setup;
pub mod spans;

pub use setup::{init_tracing, init_tracing_with_config};
