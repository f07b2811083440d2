// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod feed;
pub mod ingest;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::FeedConfig;
pub use crate::feed::{HighlightRecord, PriorityRules};
pub use crate::ingest::{run_and_persist, run_once, RunReport};
