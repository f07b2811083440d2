// src/config.rs
//! Runtime configuration for the highlights pipeline.
//!
//! Lookup order:
//! 1) $HIGHLIGHTS_CONFIG_PATH (must exist)
//! 2) config/highlights.toml
//! 3) config/highlights.json
//! 4) built-in defaults
//!
//! Every field is optional in the file; missing ones take the defaults below.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feed::priority::{PriorityRules, DEFAULT_EXCLUSION_KEYWORDS, DEFAULT_FEATURED_TEAMS};
use crate::feed::rank::DEFAULT_RETENTION_CAP;

pub const ENV_CONFIG_PATH: &str = "HIGHLIGHTS_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/highlights.toml";
pub const DEFAULT_JSON_PATH: &str = "config/highlights.json";

pub const DEFAULT_API_BASE: &str = "https://api.sofascore.com/api/v1";
pub const DEFAULT_FILE_PATH: &str = "api/highlights.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub api_base: String,
    pub file_path: PathBuf,
    /// Days before today to include; 1 = yesterday + today.
    pub days_back: u32,
    pub batch_size: usize,
    pub batch_delay_ms: u64,
    pub list_timeout_secs: u64,
    pub match_timeout_secs: u64,
    /// 0 disables the cap.
    pub retention_cap: usize,
    /// Run periodically in-process instead of once.
    pub interval_secs: Option<u64>,
    pub featured_teams: Vec<String>,
    pub exclusion_keywords: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            file_path: PathBuf::from(DEFAULT_FILE_PATH),
            days_back: 1,
            batch_size: 10,
            batch_delay_ms: 1_000,
            list_timeout_secs: 15,
            match_timeout_secs: 10,
            retention_cap: DEFAULT_RETENTION_CAP,
            interval_secs: None,
            featured_teams: DEFAULT_FEATURED_TEAMS.iter().map(|s| s.to_string()).collect(),
            exclusion_keywords: DEFAULT_EXCLUSION_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FeedConfig {
    pub fn priority_rules(&self) -> PriorityRules {
        PriorityRules::new(
            self.featured_teams.as_slice(),
            self.exclusion_keywords.as_slice(),
        )
    }

    pub fn retention_cap(&self) -> Option<usize> {
        (self.retention_cap > 0).then_some(self.retention_cap)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn match_timeout(&self) -> Duration {
        Duration::from_secs(self.match_timeout_secs)
    }
}

/// Load config from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<FeedConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing config {}", path.display()))
}

pub fn load_config_default() -> Result<FeedConfig> {
    if let Some(p) = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from) {
        if !p.exists() {
            return Err(anyhow!("{ENV_CONFIG_PATH}={} does not exist", p.display()));
        }
        return load_config_from(&p);
    }
    match [DEFAULT_TOML_PATH, DEFAULT_JSON_PATH]
        .into_iter()
        .map(Path::new)
        .find(|p| p.exists())
    {
        Some(p) => load_config_from(p),
        None => Ok(FeedConfig::default()),
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<FeedConfig> {
    let looks_json = s.trim_start().starts_with('{');
    let cfg = if hint_ext == "json" || (hint_ext != "toml" && looks_json) {
        serde_json::from_str::<FeedConfig>(s)?
    } else {
        toml::from_str::<FeedConfig>(s)?
    };
    Ok(clean(cfg))
}

fn clean(mut cfg: FeedConfig) -> FeedConfig {
    cfg.featured_teams = clean_list(cfg.featured_teams);
    cfg.exclusion_keywords = clean_list(cfg.exclusion_keywords);
    cfg.batch_size = cfg.batch_size.max(1);
    cfg
}

// Exclusion keywords may be padded with spaces on purpose (" b "), so only
// blank entries and exact repeats are removed; order is kept.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        if it.trim().is_empty() || out.contains(&it) {
            continue;
        }
        out.push(it);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = parse_config("batch_size = 8\nretention_cap = 0\n", "toml").unwrap();
        assert_eq!(cfg.batch_size, 8);
        assert_eq!(cfg.retention_cap(), None);
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert!(!cfg.featured_teams.is_empty());
    }

    #[test]
    fn lists_drop_blanks_and_repeats_but_keep_padding() {
        let cfg = parse_config(
            r#"{"exclusion_keywords": [" b ", "", " b ", "u21"], "batch_size": 0}"#,
            "",
        )
        .unwrap();
        assert_eq!(cfg.exclusion_keywords, vec![" b ".to_string(), "u21".to_string()]);
        assert_eq!(cfg.batch_size, 1);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_config("[[[", "toml").is_err());
    }
}
