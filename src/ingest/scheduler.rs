// src/ingest/scheduler.rs
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::FeedConfig;
use crate::ingest::types::HighlightSource;

/// Spawn a loop that runs the pipeline and persists the feed every `interval`.
/// The first run starts immediately. A failed write is logged and retried on
/// the next tick; the loop only ends when the handle is aborted.
pub fn spawn_scheduler(
    cfg: Arc<FeedConfig>,
    source: Arc<dyn HighlightSource>,
    interval: Duration,
) -> JoinHandle<()> {
    crate::ingest::ensure_metrics_described();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            counter!("highlights_runs_total").increment(1);

            match crate::ingest::run_and_persist(source.as_ref(), &cfg).await {
                Ok(report) => tracing::info!(
                    target: "ingest",
                    size = report.records.len(),
                    new = report.new_drafts,
                    removed = report.removed(),
                    "scheduled highlights tick"
                ),
                Err(e) => tracing::error!(target: "ingest", error = ?e, "scheduled run failed to persist"),
            }
        }
    })
}
