//! src/graph.rs
//!
//! Top-level `graph` module: per-graph configuration and the shared state the
//! feed threads and panels operate on.

pub mod config;
pub mod shared;

/// Re-exports
pub use config::GraphConfig;
pub use shared::{GraphShared, SharedGraph};
