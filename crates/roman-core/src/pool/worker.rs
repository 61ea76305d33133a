use super::request::WorkRequest;
use crate::ConversionResult;
use tokio::sync::mpsc;

/// Worker task that converts chunks of integers until told to shut down.
///
/// Spawned once per worker by [`WorkerPool::spawn`](super::WorkerPool::spawn).
/// Chunks are processed one at a time; a chunk whose requester has already
/// gone away is skipped rather than converted.
pub async fn worker_loop(worker_id: usize, mut rx: mpsc::Receiver<WorkRequest>) {
    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} started");

    while let Some(work) = rx.recv().await {
        match work {
            WorkRequest::Convert {
                start,
                end,
                response,
            } => {
                if response.is_closed() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Worker {worker_id} skipping abandoned chunk {start}..={end}");
                    continue;
                }

                let chunk = convert_chunk(start, end);

                #[cfg(feature = "tracing")]
                tracing::trace!("Worker {worker_id} converted {start}..={end}");

                if response.send(chunk).is_err() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Worker {worker_id} failed to return chunk {start}..={end}");
                }

                // Chunks are pure CPU work; let other tasks on this runtime
                // thread make progress between them.
                tokio::task::yield_now().await;
            }
            WorkRequest::Shutdown { response } => {
                #[cfg(feature = "tracing")]
                tracing::debug!("Worker {worker_id} received shutdown signal");

                if response.send(()).is_err() {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Worker {worker_id} failed to acknowledge shutdown");
                }
                break;
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!("Worker {worker_id} stopped");
    #[cfg(not(feature = "tracing"))]
    let _ = worker_id;
}

/// Converts `start..=end` in ascending order.
pub fn convert_chunk(start: u16, end: u16) -> Vec<ConversionResult> {
    (start..=end).map(ConversionResult::convert).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn chunk_is_inclusive_and_ascending() {
        let chunk = convert_chunk(8, 11);
        let inputs: Vec<_> = chunk.iter().map(|c| c.input).collect();
        let outputs: Vec<_> = chunk.iter().map(|c| c.output.as_str()).collect();
        assert_eq!(inputs, [8, 9, 10, 11]);
        assert_eq!(outputs, ["VIII", "IX", "X", "XI"]);
    }

    #[test]
    fn single_value_chunk() {
        assert_eq!(convert_chunk(3999, 3999), vec![ConversionResult::convert(3999)]);
    }

    #[tokio::test]
    async fn worker_converts_then_acknowledges_shutdown() {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(worker_loop(0, rx));

        let (chunk_tx, chunk_rx) = oneshot::channel();
        tx.send(WorkRequest::Convert {
            start: 1,
            end: 3,
            response: chunk_tx,
        })
        .await
        .unwrap();
        assert_eq!(chunk_rx.await.unwrap(), convert_chunk(1, 3));

        let (ack_tx, ack_rx) = oneshot::channel();
        tx.send(WorkRequest::Shutdown { response: ack_tx })
            .await
            .unwrap();
        ack_rx.await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn worker_stops_when_pool_drops_sender() {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(worker_loop(7, rx));
        drop(tx);
        handle.await.unwrap();
    }
}
