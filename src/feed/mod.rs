// src/feed/mod.rs
//! Feed core: link normalization, per-match classification, priority rules,
//! merge/dedupe against persisted state, and ranking.

pub mod classify;
pub mod merge;
pub mod priority;
pub mod rank;
pub mod record;
pub mod video;

pub use classify::{classify_match, Classification};
pub use merge::{merge_dedupe, MergeOutcome};
pub use priority::PriorityRules;
pub use rank::{rank, RankOutcome};
pub use record::HighlightRecord;
