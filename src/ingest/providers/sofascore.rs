// src/ingest/providers/sofascore.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use metrics::histogram;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER};
use serde::Deserialize;
use std::time::Duration;

use crate::config::FeedConfig;
use crate::ingest::types::{HighlightCandidate, HighlightSource, MatchRecord};

// The API rejects obvious bots, so requests look like a desktop Chrome session.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const SITE_ORIGIN: &str = "https://www.sofascore.com";

// ---- wire format ----

#[derive(Debug, Deserialize)]
struct EventsBody {
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEvent {
    id: u64,
    #[serde(default)]
    home_team: Named,
    #[serde(default)]
    away_team: Named,
    tournament: Option<Named>,
    #[serde(default)]
    start_timestamp: i64,
    status: Option<WireStatus>,
}

#[derive(Debug, Default, Deserialize)]
struct Named {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireStatus {
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct HighlightsBody {
    #[serde(default)]
    highlights: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireHighlight {
    subtitle: Option<String>,
    url: Option<String>,
    source_url: Option<String>,
    for_countries: Option<Vec<String>>,
}

impl From<WireEvent> for MatchRecord {
    fn from(e: WireEvent) -> Self {
        MatchRecord {
            id: e.id,
            home_team: e.home_team.name,
            away_team: e.away_team.name,
            tournament: e.tournament.map(|t| t.name).filter(|n| !n.trim().is_empty()),
            start_timestamp: e.start_timestamp,
            status: e.status.map(|s| s.kind).unwrap_or_default(),
        }
    }
}

impl From<WireHighlight> for HighlightCandidate {
    fn from(h: WireHighlight) -> Self {
        HighlightCandidate {
            label: h.subtitle.unwrap_or_default(),
            url: h.url.filter(|u| !u.trim().is_empty()),
            source_url: h.source_url.filter(|u| !u.trim().is_empty()),
            restricted_countries: h.for_countries.unwrap_or_default(),
        }
    }
}

/// Decode list entries one by one; a malformed entry is dropped on its own.
fn decode_entries<W, T>(items: Vec<serde_json::Value>, what: &'static str) -> Vec<T>
where
    W: serde::de::DeserializeOwned,
    T: From<W>,
{
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<W>(item) {
            Ok(w) => Some(T::from(w)),
            Err(e) => {
                tracing::warn!(target: "ingest", what, index, error = %e, "skipping malformed entry");
                None
            }
        })
        .collect()
}

/// Parse a `scheduled-events` response body.
pub fn parse_events_body(body: &str) -> Result<Vec<MatchRecord>> {
    let parsed: EventsBody = serde_json::from_str(body).context("parsing events body")?;
    Ok(decode_entries::<WireEvent, MatchRecord>(parsed.events, "event"))
}

/// Parse an `event/{id}/highlights` response body.
pub fn parse_highlights_body(body: &str) -> Result<Vec<HighlightCandidate>> {
    let parsed: HighlightsBody = serde_json::from_str(body).context("parsing highlights body")?;
    Ok(decode_entries::<WireHighlight, HighlightCandidate>(
        parsed.highlights,
        "highlight",
    ))
}

pub fn events_url(api_base: &str, date: &str) -> String {
    format!(
        "{}/sport/football/scheduled-events/{date}",
        api_base.trim_end_matches('/')
    )
}

pub fn highlights_url(api_base: &str, match_id: u64) -> String {
    format!("{}/event/{match_id}/highlights", api_base.trim_end_matches('/'))
}

pub struct SofascoreProvider {
    client: reqwest::Client,
    api_base: String,
    list_timeout: Duration,
    match_timeout: Duration,
}

impl SofascoreProvider {
    pub fn from_config(cfg: &FeedConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(ORIGIN, HeaderValue::from_static(SITE_ORIGIN));
        headers.insert(REFERER, HeaderValue::from_static("https://www.sofascore.com/"));

        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .connect_timeout(cfg.list_timeout())
            .build()
            .context("building http client")?;

        Ok(Self {
            client,
            api_base: cfg.api_base.clone(),
            list_timeout: cfg.list_timeout(),
            match_timeout: cfg.match_timeout(),
        })
    }

    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String> {
        let t0 = std::time::Instant::now();
        let resp = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("GET {url}: HTTP {status}"));
        }
        let body = resp.text().await.with_context(|| format!("reading body of {url}"))?;
        histogram!("highlights_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        Ok(body)
    }
}

#[async_trait]
impl HighlightSource for SofascoreProvider {
    async fn fetch_matches(&self, date: &str) -> Result<Vec<MatchRecord>> {
        let url = events_url(&self.api_base, date);
        let body = self.get_text(&url, self.list_timeout).await?;
        parse_events_body(&body)
    }

    async fn fetch_highlights(&self, match_id: u64) -> Result<Vec<HighlightCandidate>> {
        let url = highlights_url(&self.api_base, match_id);
        let body = self.get_text(&url, self.match_timeout).await?;
        parse_highlights_body(&body)
    }

    fn name(&self) -> &'static str {
        "SofaScore"
    }
}
