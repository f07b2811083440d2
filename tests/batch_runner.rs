// tests/batch_runner.rs
use highlights_feed::ingest::batch::BatchRunner;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::test]
async fn never_exceeds_batch_size_and_keeps_order() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let runner = BatchRunner::new(3, Duration::from_millis(1));

    let items: Vec<u32> = (0..10).collect();
    let out = runner
        .run(items, |i| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                // later items finish first inside a batch
                tokio::time::sleep(Duration::from_millis(u64::from(10 - i))).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                i * 2
            }
        })
        .await;

    assert_eq!(out, (0..10).map(|i| i * 2).collect::<Vec<_>>());
    assert_eq!(peak.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn cooldown_applies_between_batches_only() {
    let runner = BatchRunner::new(2, Duration::from_millis(60));
    let t0 = Instant::now();
    // 3 batches → 2 pauses
    let out = runner.run(vec![1, 2, 3, 4, 5], |x| async move { x }).await;
    let elapsed = t0.elapsed();
    assert_eq!(out, vec![1, 2, 3, 4, 5]);
    assert!(elapsed >= Duration::from_millis(120), "elapsed {elapsed:?}");
}
