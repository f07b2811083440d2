// src/ingest/types.rs
use anyhow::Result;

/// One match summary as listed by the upstream API for a given date.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct MatchRecord {
    pub id: u64,
    pub home_team: String,
    pub away_team: String,
    pub tournament: Option<String>,
    pub start_timestamp: i64, // unix seconds
    pub status: String,       // e.g., "finished", "inprogress", "notstarted"
}

impl MatchRecord {
    pub fn is_finished(&self) -> bool {
        let s = self.status.trim();
        s.eq_ignore_ascii_case("finished") || s.eq_ignore_ascii_case("ended")
    }
}

/// One highlight entry attached to a match.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct HighlightCandidate {
    pub label: String,
    pub url: Option<String>,
    pub source_url: Option<String>,
    pub restricted_countries: Vec<String>, // empty = playable everywhere
}

/// Result of a best-effort upstream call.
///
/// Both variants degrade to an empty list for the pipeline; keeping them apart
/// lets callers and tests tell "upstream had nothing" from "upstream failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    Fetched(Vec<T>),
    Recovered { reason: String },
}

impl<T> FetchOutcome<T> {
    pub fn from_result(res: Result<Vec<T>>) -> Self {
        match res {
            Ok(v) => FetchOutcome::Fetched(v),
            Err(e) => FetchOutcome::Recovered {
                reason: format!("{e:#}"),
            },
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, FetchOutcome::Recovered { .. })
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            FetchOutcome::Fetched(v) => v,
            FetchOutcome::Recovered { .. } => Vec::new(),
        }
    }
}

/// Upstream collaborator: date → matches, match id → highlight entries.
#[async_trait::async_trait]
pub trait HighlightSource: Send + Sync {
    async fn fetch_matches(&self, date: &str) -> Result<Vec<MatchRecord>>;
    async fn fetch_highlights(&self, match_id: u64) -> Result<Vec<HighlightCandidate>>;
    fn name(&self) -> &'static str;
}
