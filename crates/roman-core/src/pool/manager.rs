//! Asynchronous worker pool for chunked range conversion.
//!
//! [`WorkerPool`] owns one bounded [`mpsc`] channel per worker task and hands
//! out [`WorkRequest`]s round-robin. Workers share nothing but the immutable
//! numeral table, so no locking is involved. Shutdown is coordinated through a
//! shared [`CancellationToken`], an admission flag and an in-flight request
//! counter that lets running requests drain first.

use super::{request::WorkRequest, worker::worker_loop};
use crate::{Error, Result, ServiceConfig};
use core::time::Duration;
use portable_atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::{
    sync::{mpsc, oneshot},
    time::{sleep, timeout},
};
use tokio_util::sync::CancellationToken;

/// A cooperative pool of asynchronous workers that process [`WorkRequest`]s.
pub struct WorkerPool {
    workers: Vec<mpsc::Sender<WorkRequest>>,
    next_worker: AtomicUsize,
    accepting: AtomicBool,
    inflight: AtomicUsize,
    shutdown_token: CancellationToken,
    shutdown_timeout: Duration,
}

impl WorkerPool {
    /// Constructs a pool from already-spawned worker channels.
    pub const fn new(
        workers: Vec<mpsc::Sender<WorkRequest>>,
        shutdown_token: CancellationToken,
        shutdown_timeout: Duration,
    ) -> Self {
        Self {
            workers,
            next_worker: AtomicUsize::new(0),
            accepting: AtomicBool::new(true),
            inflight: AtomicUsize::new(0),
            shutdown_token,
            shutdown_timeout,
        }
    }

    /// Spawns `config.num_workers` worker tasks on the current Tokio runtime
    /// and returns the pool that feeds them.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime, or if `num_workers` or
    /// `worker_queue_size` is zero.
    pub fn spawn(config: &ServiceConfig) -> Self {
        assert!(config.num_workers > 0, "worker pool needs at least one worker");

        let workers = (0..config.num_workers)
            .map(|worker_id| {
                // Each coordinator awaits its chunk before the worker sees
                // the next one, so deep queues only add memory pressure.
                let (tx, rx) = mpsc::channel(config.worker_queue_size);
                tokio::spawn(worker_loop(worker_id, rx));
                tx
            })
            .collect();

        Self::new(workers, CancellationToken::new(), config.shutdown_timeout)
    }

    /// Number of workers in the pool.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Returns the index of the next worker to receive work (round-robin).
    pub fn next_worker_index(&self) -> usize {
        self.next_worker.fetch_add(1, Ordering::Relaxed) % self.workers.len()
    }

    /// Sends a [`WorkRequest`] to the next worker in the pool.
    ///
    /// # Errors
    ///
    /// - [`Error::ServiceShutdown`] once the shutdown token has been cancelled.
    /// - [`Error::ChannelError`] if the worker's channel is closed.
    pub async fn send_to_next_worker(&self, request: WorkRequest) -> Result<()> {
        if self.shutdown_token.is_cancelled() {
            return Err(Error::ServiceShutdown);
        }

        let worker_idx = self.next_worker_index();
        self.workers[worker_idx]
            .send(request)
            .await
            .map_err(|_| Error::ChannelError {
                context: format!("Worker {worker_idx} channel closed"),
            })
    }

    /// Registers a request as in flight for the lifetime of the returned guard.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ServiceShutdown`] once shutdown has begun.
    pub fn begin_request(&self) -> Result<InflightGuard<'_>> {
        self.inflight.fetch_add(1, Ordering::AcqRel);
        let guard = InflightGuard { pool: self };
        // Checked after registering so that a concurrent `shutdown` either
        // sees this request in its drain loop or this request sees the flag.
        if !self.accepting.load(Ordering::Acquire) {
            return Err(Error::ServiceShutdown);
        }
        Ok(guard)
    }

    /// Number of requests currently holding an [`InflightGuard`].
    pub fn inflight(&self) -> usize {
        self.inflight.load(Ordering::Acquire)
    }

    /// Whether [`shutdown`](Self::shutdown) has started refusing new requests.
    pub fn is_shut_down(&self) -> bool {
        !self.accepting.load(Ordering::Acquire)
    }

    /// Gracefully shuts down all workers in the pool.
    ///
    /// 1. Stops admitting new requests.
    /// 2. Waits up to `shutdown_timeout` for in-flight requests to drain.
    /// 3. Cancels the shared [`CancellationToken`] so any remaining dispatch
    ///    fails with [`Error::ServiceShutdown`].
    /// 4. Sends [`WorkRequest::Shutdown`] to each worker and waits (up to 3
    ///    seconds per worker) for acknowledgements.
    ///
    /// Calling this more than once is harmless.
    pub async fn shutdown(&self) -> Result<()> {
        if !self.accepting.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Refusing new requests");

        #[cfg(feature = "tracing")]
        tracing::info!("Draining in-flight requests ({} active)", self.inflight());

        let drain_result = timeout(self.shutdown_timeout, async {
            while self.inflight() > 0 {
                sleep(Duration::from_millis(50)).await;
            }
        })
        .await;

        match drain_result {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("All in-flight requests drained");
            }
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    "Graceful drain timed out ({} requests still active)",
                    self.inflight()
                );
            }
        }

        self.shutdown_token.cancel();

        let mut acks = Vec::with_capacity(self.workers.len());
        for (i, worker) in self.workers.iter().enumerate() {
            let (tx, rx) = oneshot::channel();
            match worker.send(WorkRequest::Shutdown { response: tx }).await {
                Ok(()) => acks.push((i, rx)),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Failed to send shutdown to worker {i}: {_e}");
                }
            }
        }

        let waits = acks.into_iter().map(|(_i, rx)| async move {
            match timeout(Duration::from_secs(3), rx).await {
                Ok(Ok(())) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("Worker {_i} shutdown acknowledged");
                }
                Ok(Err(_e)) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Worker {_i} dropped its acknowledgement: {_e}");
                }
                Err(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Worker {_i} shutdown timed out");
                }
            }
        });
        futures::future::join_all(waits).await;

        #[cfg(feature = "tracing")]
        tracing::info!("Worker pool shutdown complete");

        Ok(())
    }
}

/// Decrements the pool's in-flight counter on drop.
pub struct InflightGuard<'a> {
    pool: &'a WorkerPool,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        self.pool.inflight.fetch_sub(1, Ordering::AcqRel);
    }
}
