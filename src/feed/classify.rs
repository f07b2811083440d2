// src/feed/classify.rs
//! Picks at most one highlight per match and collects geo-restricted video ids.

use std::collections::HashSet;

use crate::feed::record::{
    clean_team_name, date_from_timestamp, new_record_id, HighlightRecord, DEFAULT_CATEGORY,
};
use crate::feed::video::{canonical_url, extract_video_id};
use crate::ingest::types::{HighlightCandidate, MatchRecord};

const QUALIFYING_LABELS: [&str; 2] = ["highlights", "extended"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub draft: Option<HighlightRecord>,
    pub restricted: HashSet<String>,
}

/// Primary URL first, then the secondary source field.
pub fn resolve_video_id(candidate: &HighlightCandidate) -> Option<String> {
    [candidate.url.as_deref(), candidate.source_url.as_deref()]
        .into_iter()
        .flatten()
        .find_map(extract_video_id)
}

pub fn has_qualifying_label(label: &str) -> bool {
    let l = label.to_lowercase();
    QUALIFYING_LABELS.iter().any(|q| l.contains(q))
}

pub fn classify_match(m: &MatchRecord, candidates: &[HighlightCandidate]) -> Classification {
    let mut out = Classification::default();

    for c in candidates {
        let Some(video_id) = resolve_video_id(c) else {
            continue;
        };

        if !c.restricted_countries.is_empty() {
            tracing::debug!(
                target: "feed",
                match_id = m.id,
                %video_id,
                countries = ?c.restricted_countries,
                "restricted highlight"
            );
            out.restricted.insert(video_id);
            continue;
        }

        if out.draft.is_none() && has_qualifying_label(&c.label) {
            out.draft = Some(build_record(m, &video_id));
        }
    }

    out
}

fn build_record(m: &MatchRecord, video_id: &str) -> HighlightRecord {
    let category = m
        .tournament
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    HighlightRecord {
        id: new_record_id(),
        team1: clean_team_name(&m.home_team),
        team2: clean_team_name(&m.away_team),
        category,
        date: date_from_timestamp(m.start_timestamp),
        link: canonical_url(video_id),
        legacy_priority: None,
    }
}
