// src/feed/priority.rs
//! Featured-match classification.
//!
//! Two phases, in this order:
//! 1. exclusion keywords (youth, reserve, women's, lower-tier qualifiers) checked
//!    against both teams and the category; any hit demotes the match;
//! 2. featured roster entries checked against both teams.
//!
//! A featured club's reserve side ("Real Madrid Castilla") therefore never
//! gets promoted through the senior club's name.
//!
//! Matching is a case-insensitive substring test on a normalized haystack:
//! lowercased, `-` folded to a space and padded with one space on each side.
//! A keyword written with surrounding spaces (`" b "`) thus only hits a whole
//! token, including one at the very end of a name ("Getafe B").

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityRules {
    featured_teams: Vec<String>,
    exclusion_keywords: Vec<String>,
}

impl PriorityRules {
    pub fn new<S: AsRef<str>>(featured_teams: &[S], exclusion_keywords: &[S]) -> Self {
        Self {
            featured_teams: normalize_keywords(featured_teams),
            exclusion_keywords: normalize_keywords(exclusion_keywords),
        }
    }

    pub fn is_excluded(&self, team1: &str, team2: &str, category: &str) -> bool {
        let fields = [haystack(team1), haystack(team2), haystack(category)];
        self.exclusion_keywords
            .iter()
            .any(|kw| fields.iter().any(|f| f.contains(kw.as_str())))
    }

    pub fn is_featured(&self, team1: &str, team2: &str) -> bool {
        let teams = [haystack(team1), haystack(team2)];
        self.featured_teams
            .iter()
            .any(|t| teams.iter().any(|f| f.contains(t.as_str())))
    }

    pub fn is_priority(&self, team1: &str, team2: &str, category: &str) -> bool {
        if self.is_excluded(team1, team2, category) {
            return false;
        }
        self.is_featured(team1, team2)
    }
}

impl Default for PriorityRules {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURED_TEAMS, DEFAULT_EXCLUSION_KEYWORDS)
    }
}

fn haystack(s: &str) -> String {
    format!(" {} ", s.to_lowercase().replace('-', " "))
}

// Keeps the padding spaces on purpose; only blank entries are dropped.
fn normalize_keywords<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.as_ref().to_lowercase().replace('-', " "))
        .filter(|s| !s.trim().is_empty())
        .collect()
}

pub const DEFAULT_FEATURED_TEAMS: &[&str] = &[
    "al nassr",
    "inter miami",
    "bayern",
    "dortmund",
    "leverkusen",
    "paris saint germain",
    "juventus",
    "atletico madrid",
    "atlético madrid",
    "barcelona",
    "real madrid",
    "arsenal",
    "chelsea",
    "manchester city",
    "manchester united",
    "liverpool",
    "portugal",
    "argentina",
    "brazil",
    "spain",
    "england",
    "france",
    "inter",
    "milan",
    "roma",
];

pub const DEFAULT_EXCLUSION_KEYWORDS: &[&str] = &[
    " u17",
    " u18",
    " u19",
    " u20",
    " u21",
    " u23",
    "youth",
    "primavera",
    "academy",
    "reserve",
    "castilla",
    " b ",
    " ii ",
    " women",
    " w ",
    "femenino",
    "féminine",
    "frauen",
    "segunda",
    "2. bundesliga",
    "league two",
    "national league",
];
