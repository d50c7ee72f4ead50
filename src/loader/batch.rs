//! Fan-in barrier over independent async loads
//!
//! The combined future completes only after every input has completed.
//! Completion order of the inputs is irrelevant and there is no timeout: an
//! input that never completes keeps the whole batch pending.

use futures::future::{join_all, try_join_all};
use std::future::Future;

/// Wait for every signal and collect their outputs in input order.
/// An empty batch completes on first poll.
pub async fn wait_all<F>(signals: Vec<F>) -> Vec<F::Output>
where
    F: Future,
{
    if signals.is_empty() {
        return Vec::new();
    }
    join_all(signals).await
}

/// Like [`wait_all`], but for fallible signals: the batch fails with the first
/// error observed and the remaining signals are dropped.
pub async fn try_wait_all<F, T, E>(signals: Vec<F>) -> Result<Vec<T>, E>
where
    F: Future<Output = Result<T, E>>,
{
    if signals.is_empty() {
        return Ok(Vec::new());
    }
    try_join_all(signals).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use futures::future::{pending, ready, BoxFuture};
    use std::cell::Cell;

    #[test]
    fn test_empty_batch_completes_immediately() {
        let batch = wait_all(Vec::<futures::future::Ready<()>>::new());
        assert_eq!(batch.now_or_never(), Some(Vec::new()));

        let batch = try_wait_all(Vec::<futures::future::Ready<Result<u8, ()>>>::new());
        assert_eq!(batch.now_or_never(), Some(Ok(Vec::new())));
    }

    #[tokio::test]
    async fn test_outputs_keep_input_order() {
        let signals: Vec<BoxFuture<'static, u32>> = vec![
            async {
                tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                1
            }
            .boxed(),
            ready(2).boxed(),
            async {
                tokio::task::yield_now().await;
                3
            }
            .boxed(),
        ];

        assert_eq!(wait_all(signals).await, vec![1, 2, 3]);
    }

    #[test]
    fn test_batch_waits_for_the_last_signal() {
        let signals: Vec<BoxFuture<'static, ()>> = vec![ready(()).boxed(), pending().boxed()];
        assert!(wait_all(signals).now_or_never().is_none());
    }

    #[test]
    fn test_every_signal_is_polled() {
        let polled = Cell::new(0);
        let signals: Vec<_> = (0..4)
            .map(|_| async {
                polled.set(polled.get() + 1);
            })
            .collect();

        let _ = wait_all(signals).now_or_never();
        assert_eq!(polled.get(), 4);
    }

    #[tokio::test]
    async fn test_try_batch_surfaces_failure() {
        let signals: Vec<BoxFuture<'static, Result<u8, &str>>> =
            vec![ready(Ok(1)).boxed(), ready(Err("boom")).boxed()];
        assert_eq!(try_wait_all(signals).await, Err("boom"));
    }
}
