// src/feed/rank.rs
use std::cmp::Ordering;

use crate::feed::priority::PriorityRules;
use crate::feed::record::HighlightRecord;

/// Retention cap used when the configuration does not override it.
pub const DEFAULT_RETENTION_CAP: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankOutcome {
    pub records: Vec<HighlightRecord>,
    pub dropped: usize,
}

/// Order by (priority, date) descending, then keep the top `cap` records.
///
/// Priority is always recomputed from `rules`. The sort is stable, so equal
/// keys keep the merge order (new before old). Records without a date rank
/// as the oldest possible date. Records beyond the cap are discarded.
pub fn rank(
    records: Vec<HighlightRecord>,
    rules: &PriorityRules,
    cap: Option<usize>,
) -> RankOutcome {
    let mut keyed: Vec<(bool, HighlightRecord)> = records
        .into_iter()
        .map(|r| (rules.is_priority(&r.team1, &r.team2, &r.category), r))
        .collect();

    keyed.sort_by(|(pa, a), (pb, b)| match pb.cmp(pa) {
        Ordering::Equal => b.date_or_oldest().cmp(a.date_or_oldest()),
        other => other,
    });

    let mut records: Vec<HighlightRecord> = keyed.into_iter().map(|(_, r)| r).collect();
    let mut dropped = 0;
    if let Some(cap) = cap {
        if records.len() > cap {
            dropped = records.len() - cap;
            records.truncate(cap);
        }
    }

    RankOutcome { records, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, team1: &str, date: Option<&str>) -> HighlightRecord {
        HighlightRecord {
            id: id.into(),
            team1: team1.into(),
            team2: "Somebody".into(),
            category: "League".into(),
            date: date.map(Into::into),
            link: format!("https://www.youtube.com/watch?v={id:_<11}"),
            legacy_priority: None,
        }
    }

    #[test]
    fn cap_counts_dropped_tail() {
        let recs = (0..5)
            .map(|i| rec(&format!("r{i}"), "Nobody", Some(format!("2024-01-0{}", i + 1).as_str())))
            .collect();
        let out = rank(recs, &PriorityRules::default(), Some(3));
        assert_eq!(out.records.len(), 3);
        assert_eq!(out.dropped, 2);
        assert_eq!(out.records[0].id, "r4");
    }

    #[test]
    fn stored_flag_is_ignored() {
        let mut stale = rec("stale", "Nobody", Some("2024-01-01"));
        stale.legacy_priority = Some(true);
        let fresh = rec("fresh", "Arsenal", Some("2023-01-01"));
        let out = rank(vec![stale, fresh], &PriorityRules::default(), None);
        assert_eq!(out.records[0].id, "fresh");
    }
}
