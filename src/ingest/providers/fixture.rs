// src/ingest/providers/fixture.rs
//! In-memory source fed with captured API bodies. Used by tests and for
//! offline runs; bodies go through the same parsers as the HTTP provider.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

use crate::ingest::providers::sofascore::{parse_events_body, parse_highlights_body};
use crate::ingest::types::{HighlightCandidate, HighlightSource, MatchRecord};

#[derive(Debug, Default)]
pub struct FixtureProvider {
    events: HashMap<String, String>,
    highlights: HashMap<u64, String>,
    failing_dates: HashSet<String>,
    failing_matches: HashSet<u64>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(mut self, date: &str, body: &str) -> Self {
        self.events.insert(date.to_string(), body.to_string());
        self
    }

    pub fn with_highlights(mut self, match_id: u64, body: &str) -> Self {
        self.highlights.insert(match_id, body.to_string());
        self
    }

    /// Simulate an upstream failure (timeout, non-200) for this date.
    pub fn failing_date(mut self, date: &str) -> Self {
        self.failing_dates.insert(date.to_string());
        self
    }

    pub fn failing_match(mut self, match_id: u64) -> Self {
        self.failing_matches.insert(match_id);
        self
    }
}

#[async_trait]
impl HighlightSource for FixtureProvider {
    async fn fetch_matches(&self, date: &str) -> Result<Vec<MatchRecord>> {
        if self.failing_dates.contains(date) {
            return Err(anyhow!("fixture: HTTP 503 for {date}"));
        }
        match self.events.get(date) {
            Some(body) => parse_events_body(body),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_highlights(&self, match_id: u64) -> Result<Vec<HighlightCandidate>> {
        if self.failing_matches.contains(&match_id) {
            return Err(anyhow!("fixture: timeout for match {match_id}"));
        }
        match self.highlights.get(&match_id) {
            Some(body) => parse_highlights_body(body),
            None => Ok(Vec::new()),
        }
    }

    fn name(&self) -> &'static str {
        "Fixture"
    }
}
