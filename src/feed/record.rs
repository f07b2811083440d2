// src/feed/record.rs
use chrono::DateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Date used for ranking when a persisted record carries none.
pub const OLDEST_DATE: &str = "1970-01-01";
pub const DEFAULT_CATEGORY: &str = "Football";

/// One entry of the published feed.
///
/// Older files may lack `date` or carry a stored `isPriority` flag; both are
/// accepted on read. The flag is never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub team1: String,
    #[serde(default)]
    pub team2: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "isPriority", default, skip_serializing)]
    pub legacy_priority: Option<bool>,
}

impl HighlightRecord {
    pub fn date_or_oldest(&self) -> &str {
        self.date.as_deref().unwrap_or(OLDEST_DATE)
    }
}

/// Fresh opaque id: four lowercase letters followed by six digits.
pub fn new_record_id() -> String {
    let mut rng = rand::rng();
    let mut id = String::with_capacity(10);
    for _ in 0..4 {
        id.push(char::from(rng.random_range(b'a'..=b'z')));
    }
    for _ in 0..6 {
        id.push(char::from(rng.random_range(b'0'..=b'9')));
    }
    id
}

/// Strip separator dashes and `FC` tokens from a team name.
pub fn clean_team_name(name: &str) -> String {
    name.replace('-', " ")
        .split_whitespace()
        .filter(|tok| *tok != "FC" && *tok != "fc")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Calendar date (UTC) of a unix timestamp, formatted `YYYY-MM-DD`.
pub fn date_from_timestamp(ts: i64) -> Option<String> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_letters_then_digits() {
        let id = new_record_id();
        assert_eq!(id.len(), 10);
        assert!(id[..4].chars().all(|c| c.is_ascii_lowercase()));
        assert!(id[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn clean_drops_fc_tokens_and_dashes() {
        assert_eq!(clean_team_name("FC Bayern-Munchen"), "Bayern Munchen");
        assert_eq!(clean_team_name("  Inter Miami fc "), "Inter Miami");
        assert_eq!(clean_team_name("Getafe B"), "Getafe B");
        // only whole tokens go
        assert_eq!(clean_team_name("FCSB"), "FCSB");
    }

    #[test]
    fn timestamp_to_utc_date() {
        assert_eq!(date_from_timestamp(1_714_521_600).as_deref(), Some("2024-05-01"));
        assert_eq!(date_from_timestamp(1_714_607_999).as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn legacy_priority_is_read_but_never_written() {
        let raw = r#"{"id":"abcd123456","team1":"A","team2":"B","category":"X",
            "date":"2024-01-01","link":"https://www.youtube.com/watch?v=AAAAAAAAAAA","isPriority":true}"#;
        let rec: HighlightRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.legacy_priority, Some(true));
        let out = serde_json::to_string(&rec).unwrap();
        assert!(!out.contains("isPriority"));
    }
}
