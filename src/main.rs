//! Highlights feed: binary entrypoint.
//! Runs the fetch → classify → merge → rank pipeline once (cron-driven) or,
//! when `interval_secs` is configured, periodically in-process.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use highlights_feed::config::load_config_default;
use highlights_feed::ingest::providers::sofascore::SofascoreProvider;
use highlights_feed::ingest::scheduler::spawn_scheduler;
use highlights_feed::ingest::types::HighlightSource;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("highlights_feed=info,ingest=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = Arc::new(load_config_default().context("loading highlights config")?);
    let source: Arc<dyn HighlightSource> = Arc::new(SofascoreProvider::from_config(&cfg)?);

    if let Some(secs) = cfg.interval_secs.filter(|s| *s > 0) {
        tracing::info!(target: "ingest", interval_secs = secs, "starting scheduler");
        let handle = spawn_scheduler(cfg.clone(), source, Duration::from_secs(secs));
        handle.await.context("scheduler task ended")?;
        return Ok(());
    }

    let report = highlights_feed::run_and_persist(source.as_ref(), &cfg).await?;
    println!(
        "Done: {} items written to {} ({} new, {} removed, {} purged as restricted).",
        report.records.len(),
        cfg.file_path.display(),
        report.new_drafts,
        report.removed(),
        report.purged
    );
    Ok(())
}
