// src/ingest/batch.rs
//! Rate-limited task group: start up to `size` tasks together, wait for all of
//! them, pause, repeat. Bounds concurrent upstream connections.

use futures::future::join_all;
use std::future::Future;
use std::time::Duration;

#[derive(Clone, Copy, Debug)]
pub struct BatchRunner {
    size: usize,
    cooldown: Duration,
}

impl BatchRunner {
    pub fn new(size: usize, cooldown: Duration) -> Self {
        Self {
            size: size.max(1),
            cooldown,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Run `f` over `items` batch by batch. Results come back in input order.
    /// The cooldown is only observed between batches, not after the last one.
    pub async fn run<I, R, F, Fut>(&self, items: Vec<I>, mut f: F) -> Vec<R>
    where
        F: FnMut(I) -> Fut,
        Fut: Future<Output = R>,
    {
        let total = items.len();
        let mut out = Vec::with_capacity(total);
        let mut iter = items.into_iter().peekable();
        let mut batch_no = 0usize;

        while iter.peek().is_some() {
            let tasks: Vec<Fut> = iter.by_ref().take(self.size).map(&mut f).collect();
            batch_no += 1;
            tracing::debug!(target: "ingest", batch = batch_no, tasks = tasks.len(), total, "batch start");
            out.extend(join_all(tasks).await);

            if iter.peek().is_some() && !self.cooldown.is_zero() {
                tokio::time::sleep(self.cooldown).await;
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn zero_size_behaves_like_one() {
        let runner = BatchRunner::new(0, Duration::ZERO);
        assert_eq!(runner.size(), 1);
        let out = runner.run(vec![1, 2, 3], |x| async move { x * 10 }).await;
        assert_eq!(out, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn empty_input_does_not_sleep() {
        let runner = BatchRunner::new(4, Duration::from_secs(60));
        let t0 = std::time::Instant::now();
        let out: Vec<u8> = runner.run(Vec::<u8>::new(), |x| async move { x }).await;
        assert!(out.is_empty());
        assert!(t0.elapsed() < Duration::from_secs(1));
    }
}
