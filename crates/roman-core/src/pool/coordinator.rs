use super::{manager::WorkerPool, request::WorkRequest};
use crate::{ConversionResult, Error, RangeResult, Result};
use futures::future::try_join_all;
use tokio::sync::oneshot;

/// Converts every integer in `min..=max` on the worker pool.
///
/// The range is split into chunks of at most `chunk_size` integers. Each chunk
/// is one [`WorkRequest::Convert`], dispatched round-robin. Every chunk is
/// awaited before returning, and the joined results are then sorted by input:
/// chunks may complete in any order, and the sort is what makes the output
/// identical to a sequential conversion.
///
/// Bounds must already be validated (`1 <= min <= max <= 3999`).
///
/// # Errors
///
/// Fails without a partial result if any chunk cannot be dispatched or its
/// worker drops the reply channel.
pub async fn convert_range(
    min: u16,
    max: u16,
    chunk_size: usize,
    worker_pool: &WorkerPool,
) -> Result<RangeResult> {
    debug_assert!(min <= max);
    let chunk_size = u16::try_from(chunk_size.max(1)).unwrap_or(u16::MAX);

    let mut pending = Vec::with_capacity(usize::from((max - min) / chunk_size) + 1);
    let mut start = min;
    loop {
        let end = start.saturating_add(chunk_size - 1).min(max);
        let (tx, rx) = oneshot::channel();

        worker_pool
            .send_to_next_worker(WorkRequest::Convert {
                start,
                end,
                response: tx,
            })
            .await?;

        pending.push(async move {
            rx.await.map_err(|_| Error::ChannelError {
                context: format!("Worker dropped chunk {start}..={end}"),
            })
        });

        if end == max {
            break;
        }
        start = end + 1;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("Dispatched {min}..={max} as {} chunks", pending.len());

    let mut conversions: Vec<ConversionResult> =
        try_join_all(pending).await?.into_iter().flatten().collect();

    conversions.sort_unstable_by_key(|c| c.input);

    Ok(RangeResult { conversions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ServiceConfig;
    use core::time::Duration;
    use std::sync::Arc;
    use tokio::task::yield_now;

    fn pool(num_workers: usize) -> WorkerPool {
        WorkerPool::spawn(&ServiceConfig {
            num_workers,
            chunk_size: 1,
            worker_queue_size: 1,
            shutdown_timeout: Duration::from_millis(100),
        })
    }

    fn assert_sequential(result: &RangeResult, min: u16, max: u16) {
        assert_eq!(result.len(), usize::from(max - min) + 1);
        for (expected, conversion) in (min..=max).zip(&result.conversions) {
            assert_eq!(conversion.input, expected);
            assert_eq!(conversion.output, roman::encode(expected));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn output_is_ordered_for_any_chunking() {
        for num_workers in [1, 2, 4, 8] {
            let pool = pool(num_workers);
            for chunk_size in [1, 3, 64, 5000] {
                let result = convert_range(1, 300, chunk_size, &pool).await.unwrap();
                assert_sequential(&result, 1, 300);
            }
            pool.shutdown().await.unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn converts_entire_domain() {
        let pool = pool(4);
        let result = convert_range(roman::MIN, roman::MAX, 17, &pool)
            .await
            .unwrap();
        assert_sequential(&result, roman::MIN, roman::MAX);
        assert_eq!(result.conversions[3998].output, "MMMCMXCIX");
        pool.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn uneven_final_chunk() {
        let pool = pool(2);
        let result = convert_range(10, 20, 4, &pool).await.unwrap();
        assert_sequential(&result, 10, 20);
        pool.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn oversized_chunk_size_is_clamped() {
        let pool = pool(1);
        let result = convert_range(3990, 3999, usize::MAX, &pool).await.unwrap();
        assert_sequential(&result, 3990, 3999);
        pool.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn inflight_range_completes_during_drain() {
        let pool = Arc::new(WorkerPool::spawn(&ServiceConfig {
            num_workers: 2,
            chunk_size: 4,
            worker_queue_size: 1,
            shutdown_timeout: Duration::from_secs(30),
        }));
        // Registered before shutdown starts, as `RomanService` does.
        let guard = pool.begin_request().unwrap();

        let shutdown = tokio::spawn({
            let pool = Arc::clone(&pool);
            async move { pool.shutdown().await }
        });
        while !pool.is_shut_down() {
            yield_now().await;
        }

        let result = convert_range(1, 50, 4, &pool).await.unwrap();
        assert_sequential(&result, 1, 50);
        drop(guard);

        shutdown.await.unwrap().unwrap();
        assert_eq!(
            convert_range(1, 5, 2, &pool).await,
            Err(Error::ServiceShutdown)
        );
    }

    #[tokio::test]
    async fn fails_after_shutdown() {
        let pool = pool(2);
        pool.shutdown().await.unwrap();
        assert_eq!(
            convert_range(1, 5, 2, &pool).await,
            Err(Error::ServiceShutdown)
        );
    }
}
