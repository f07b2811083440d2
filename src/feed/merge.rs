// src/feed/merge.rs
//! Merge freshly classified records with the persisted feed.
//!
//! New records go first so they win ties. Records whose video id was seen as
//! restricted during this run are purged, including ones accepted by earlier runs.

use std::collections::HashSet;

use crate::feed::record::HighlightRecord;
use crate::feed::video::{canonical_url, extract_video_id};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: Vec<HighlightRecord>,
    pub purged: usize,
    pub duplicates: usize,
    pub invalid: usize, // no link at all
}

pub fn merge_dedupe(
    new: Vec<HighlightRecord>,
    old: Vec<HighlightRecord>,
    restricted: &HashSet<String>,
) -> MergeOutcome {
    let mut out = MergeOutcome {
        records: Vec::with_capacity(new.len() + old.len()),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::new();

    for mut rec in new.into_iter().chain(old) {
        if rec.link.trim().is_empty() {
            out.invalid += 1;
            continue;
        }

        // Unparseable links dedupe on the raw string and are never restricted.
        let key = match extract_video_id(&rec.link) {
            Some(id) => {
                if restricted.contains(&id) {
                    tracing::debug!(target: "feed", video_id = %id, record = %rec.id, "purged restricted record");
                    out.purged += 1;
                    continue;
                }
                rec.link = canonical_url(&id);
                id
            }
            None => rec.link.clone(),
        };

        if !seen.insert(key) {
            out.duplicates += 1;
            continue;
        }

        rec.legacy_priority = None;
        out.records.push(rec);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, link: &str) -> HighlightRecord {
        HighlightRecord {
            id: id.into(),
            team1: "A".into(),
            team2: "B".into(),
            category: "Cup".into(),
            date: Some("2024-01-01".into()),
            link: link.into(),
            legacy_priority: Some(true),
        }
    }

    #[test]
    fn different_url_shapes_of_one_video_collapse() {
        let new = vec![rec("new", "https://youtu.be/AAAAAAAAAAA")];
        let old = vec![rec("old", "https://www.youtube.com/watch?v=AAAAAAAAAAA")];
        let out = merge_dedupe(new, old, &HashSet::new());
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].id, "new");
        assert_eq!(
            out.records[0].link,
            "https://www.youtube.com/watch?v=AAAAAAAAAAA"
        );
        assert_eq!(out.duplicates, 1);
    }

    #[test]
    fn legacy_flag_is_stripped_and_empty_links_dropped() {
        let out = merge_dedupe(
            vec![],
            vec![rec("x", "https://youtu.be/BBBBBBBBBBB"), rec("y", "  ")],
            &HashSet::new(),
        );
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].legacy_priority, None);
        assert_eq!(out.invalid, 1);
    }
}
