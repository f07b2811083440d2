// tests/classify_match.rs
use highlights_feed::feed::classify::classify_match;
use highlights_feed::ingest::types::{HighlightCandidate, MatchRecord};

fn finished_match(home: &str, away: &str, tournament: Option<&str>) -> MatchRecord {
    MatchRecord {
        id: 77,
        home_team: home.into(),
        away_team: away.into(),
        tournament: tournament.map(Into::into),
        start_timestamp: 1_714_590_000, // 2024-05-01 19:00 UTC
        status: "finished".into(),
    }
}

fn entry(label: &str, url: &str, countries: &[&str]) -> HighlightCandidate {
    HighlightCandidate {
        label: label.into(),
        url: Some(url.into()),
        source_url: None,
        restricted_countries: countries.iter().map(|c| c.to_string()).collect(),
    }
}

#[test]
fn restricted_entry_is_never_the_draft() {
    let m = finished_match("Arsenal", "Chelsea", Some("Premier League"));
    let out = classify_match(
        &m,
        &[entry("Highlights", "https://www.youtube.com/watch?v=RRRRRRRRRRR", &["US"])],
    );
    assert!(out.draft.is_none());
    assert!(out.restricted.contains("RRRRRRRRRRR"));
}

#[test]
fn first_qualifying_entry_wins_but_all_entries_are_scanned() {
    let m = finished_match("Arsenal", "Chelsea", Some("Premier League"));
    let out = classify_match(
        &m,
        &[
            entry("Goal 12'", "https://youtu.be/GGGGGGGGGGG", &[]),
            entry("Highlights", "https://youtu.be/FFFFFFFFFFF", &[]),
            entry("Extended highlights", "https://youtu.be/SSSSSSSSSSS", &[]),
            entry("Highlights", "https://youtu.be/XXXXXXXXXXX", &["GB"]),
        ],
    );
    let draft = out.draft.expect("draft");
    assert_eq!(draft.link, "https://www.youtube.com/watch?v=FFFFFFFFFFF");
    assert_eq!(out.restricted.len(), 1);
    assert!(out.restricted.contains("XXXXXXXXXXX"));
}

#[test]
fn draft_fields_are_cleaned_and_derived() {
    let m = finished_match("FC Bayern-Munchen", "Inter Miami fc", None);
    let out = classify_match(
        &m,
        &[entry("EXTENDED", "https://www.youtube.com/embed/ABCDEFGHIJK", &[])],
    );
    let d = out.draft.expect("draft");
    assert_eq!(d.team1, "Bayern Munchen");
    assert_eq!(d.team2, "Inter Miami");
    assert_eq!(d.category, "Football");
    assert_eq!(d.date.as_deref(), Some("2024-05-01"));
    assert_eq!(d.link, "https://www.youtube.com/watch?v=ABCDEFGHIJK");
    assert_eq!(d.id.len(), 10);
    assert_eq!(d.legacy_priority, None);
}

#[test]
fn no_qualifying_label_means_no_draft() {
    let m = finished_match("Lecce", "Monza", Some("Serie A"));
    let out = classify_match(
        &m,
        &[
            entry("Goal 3'", "https://youtu.be/AAAAAAAAAAA", &[]),
            entry("Press conference", "https://youtu.be/BBBBBBBBBBB", &[]),
        ],
    );
    assert!(out.draft.is_none());
    assert!(out.restricted.is_empty());
}

#[test]
fn empty_list_is_an_empty_result() {
    let m = finished_match("Lecce", "Monza", None);
    let out = classify_match(&m, &[]);
    assert!(out.draft.is_none());
    assert!(out.restricted.is_empty());
}
