// src/ingest/mod.rs
pub mod batch;
pub mod providers;
pub mod scheduler;
pub mod types;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

use crate::config::FeedConfig;
use crate::feed::{classify_match, merge_dedupe, rank, HighlightRecord};
use crate::ingest::batch::BatchRunner;
use crate::ingest::types::{FetchOutcome, HighlightCandidate, HighlightSource, MatchRecord};
use crate::store;

/// One-time metrics registration (so series show up once a recorder is installed).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "highlights_matches_total",
            "Finished matches processed for highlights."
        );
        describe_counter!(
            "highlights_new_records_total",
            "Draft records produced by the candidate classifier."
        );
        describe_counter!(
            "highlights_purged_total",
            "Records removed because their video is geo-restricted."
        );
        describe_counter!(
            "highlights_duplicates_total",
            "Records removed as duplicates of an already accepted video."
        );
        describe_counter!(
            "highlights_upstream_recovered_total",
            "Upstream calls that failed and were treated as empty."
        );
        describe_counter!(
            "highlights_runs_total",
            "Pipeline runs started by the in-process scheduler."
        );
        describe_histogram!("highlights_run_ms", "Pipeline run time in milliseconds.");
        describe_histogram!("highlights_fetch_ms", "Upstream request time in milliseconds.");
        describe_gauge!("highlights_feed_size", "Records in the feed after the last run.");
        describe_gauge!(
            "highlights_last_run_ts",
            "Unix ts when the pipeline last ran."
        );
    });
}

/// Counts from one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub records: Vec<HighlightRecord>,
    pub matches_seen: usize,
    pub matches_finished: usize,
    pub new_drafts: usize,
    pub restricted_ids: usize,
    pub purged: usize,
    pub duplicates: usize,
    pub dropped_by_cap: usize,
    pub upstream_recovered: usize,
    pub previous_len: usize,
}

impl RunReport {
    /// Records dropped this run: purged, duplicate, link-less or over the cap.
    pub fn removed(&self) -> usize {
        (self.previous_len + self.new_drafts).saturating_sub(self.records.len())
    }
}

/// `today - days_back ..= today`, oldest first.
pub fn date_range(today: NaiveDate, days_back: u32) -> Vec<String> {
    (0..=i64::from(days_back))
        .rev()
        .map(|d| (today - ChronoDuration::days(d)).format("%Y-%m-%d").to_string())
        .collect()
}

pub async fn fetch_matches_outcome(
    source: &dyn HighlightSource,
    date: &str,
) -> FetchOutcome<MatchRecord> {
    let outcome = FetchOutcome::from_result(source.fetch_matches(date).await);
    if let FetchOutcome::Recovered { reason } = &outcome {
        tracing::warn!(target: "ingest", provider = source.name(), date, %reason, "match list unavailable; using empty");
        counter!("highlights_upstream_recovered_total").increment(1);
    }
    outcome
}

pub async fn fetch_highlights_outcome(
    source: &dyn HighlightSource,
    match_id: u64,
) -> FetchOutcome<HighlightCandidate> {
    let outcome = FetchOutcome::from_result(source.fetch_highlights(match_id).await);
    if let FetchOutcome::Recovered { reason } = &outcome {
        tracing::warn!(target: "ingest", provider = source.name(), match_id, %reason, "highlights unavailable; using empty");
        counter!("highlights_upstream_recovered_total").increment(1);
    }
    outcome
}

/// Run the pipeline once against `existing` state. Never fails: upstream
/// problems degrade to empty results and are counted in the report.
pub async fn run_once(
    source: &dyn HighlightSource,
    cfg: &FeedConfig,
    existing: Vec<HighlightRecord>,
    today: NaiveDate,
) -> RunReport {
    ensure_metrics_described();
    let t0 = std::time::Instant::now();

    let mut report = RunReport {
        previous_len: existing.len(),
        ..Default::default()
    };

    // 1) Match lists, one date after the other.
    let mut matches: Vec<MatchRecord> = Vec::new();
    for date in date_range(today, cfg.days_back) {
        let outcome = fetch_matches_outcome(source, &date).await;
        if outcome.is_recovered() {
            report.upstream_recovered += 1;
        }
        matches.extend(outcome.into_items());
    }
    report.matches_seen = matches.len();

    // A late kickoff can be listed under two dates.
    let mut seen_ids = HashSet::new();
    let finished: Vec<MatchRecord> = matches
        .into_iter()
        .filter(|m| m.is_finished() && seen_ids.insert(m.id))
        .collect();
    report.matches_finished = finished.len();
    counter!("highlights_matches_total").increment(finished.len() as u64);

    // 2) Per-match highlights in bounded batches; each task owns its match.
    let runner = BatchRunner::new(cfg.batch_size, cfg.batch_delay());
    let results = runner
        .run(finished, |m| async move {
            let outcome = fetch_highlights_outcome(source, m.id).await;
            let recovered = outcome.is_recovered();
            let classification = classify_match(&m, &outcome.into_items());
            (classification, recovered)
        })
        .await;

    let mut drafts: Vec<HighlightRecord> = Vec::new();
    let mut restricted: HashSet<String> = HashSet::new();
    for (classification, recovered) in results {
        if recovered {
            report.upstream_recovered += 1;
        }
        restricted.extend(classification.restricted);
        drafts.extend(classification.draft);
    }
    report.new_drafts = drafts.len();
    report.restricted_ids = restricted.len();
    counter!("highlights_new_records_total").increment(drafts.len() as u64);

    // 3) Merge with prior state, then rank.
    let merged = merge_dedupe(drafts, existing, &restricted);
    report.purged = merged.purged;
    report.duplicates = merged.duplicates;
    counter!("highlights_purged_total").increment(merged.purged as u64);
    counter!("highlights_duplicates_total").increment(merged.duplicates as u64);

    let ranked = rank(merged.records, &cfg.priority_rules(), cfg.retention_cap());
    report.dropped_by_cap = ranked.dropped;
    report.records = ranked.records;

    let now = Utc::now().timestamp().max(0) as u64;
    histogram!("highlights_run_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    gauge!("highlights_feed_size").set(report.records.len() as f64);
    gauge!("highlights_last_run_ts").set(now as f64);

    tracing::info!(
        target: "ingest",
        provider = source.name(),
        matches = report.matches_seen,
        finished = report.matches_finished,
        drafts = report.new_drafts,
        purged = report.purged,
        duplicates = report.duplicates,
        dropped = report.dropped_by_cap,
        recovered = report.upstream_recovered,
        size = report.records.len(),
        "highlights run complete"
    );

    report
}

/// Load the persisted feed, run once for today's UTC date, write the result back.
/// Only a failed write is an error.
pub async fn run_and_persist(
    source: &dyn HighlightSource,
    cfg: &FeedConfig,
) -> anyhow::Result<RunReport> {
    let existing = store::load_records(&cfg.file_path);
    let report = run_once(source, cfg, existing, Utc::now().date_naive()).await;
    store::save_records(&cfg.file_path, &report.records)?;
    Ok(report)
}
