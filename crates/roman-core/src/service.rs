//! Request processing entry point.
//!
//! [`RomanService`] is what an outer surface (HTTP handler, CLI, test harness)
//! talks to. It resolves the request mode, validates the raw parameters, and
//! either encodes a single value inline or fans a range out to the
//! [`WorkerPool`].

use crate::{
    Request, ResponseBody, Result, ServiceConfig, SingleResult,
    pool::{WorkerPool, convert_range},
    validate::{validate_integer, validate_range},
};
use std::sync::Arc;

/// Stateless request processor backed by a shared worker pool.
///
/// Cloning is cheap: clones share the same pool.
#[derive(Clone)]
pub struct RomanService {
    config: ServiceConfig,
    worker_pool: Arc<WorkerPool>,
}

impl RomanService {
    /// Creates the service and spawns its worker pool on the current Tokio
    /// runtime.
    ///
    /// # Panics
    ///
    /// Panics outside a Tokio runtime, or if `num_workers` or
    /// `worker_queue_size` is zero. The server validates both at startup.
    pub fn new(config: ServiceConfig) -> Self {
        let worker_pool = WorkerPool::spawn(&config);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Spawned {} workers (chunk size {})",
            worker_pool.len(),
            config.chunk_size
        );

        Self {
            config,
            worker_pool: Arc::new(worker_pool),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Converts a single number or an inclusive range of numbers.
    ///
    /// Exactly `query`, or exactly `min` together with `max`, must be supplied.
    /// Values arrive as raw strings; parsing and validation happen here.
    /// Range mode suspends the caller until every chunk has been converted and
    /// returns the conversions in ascending order.
    ///
    /// # Errors
    ///
    /// - [`InvalidParameters`](crate::Error::InvalidParameters) if the
    ///   parameters match neither mode.
    /// - [`InvalidInput`](crate::Error::InvalidInput) /
    ///   [`OutOfRange`](crate::Error::OutOfRange) from
    ///   [`validate_integer`].
    /// - [`InvalidRange`](crate::Error::InvalidRange) if `min >= max`.
    /// - [`ServiceShutdown`](crate::Error::ServiceShutdown) /
    ///   [`ChannelError`](crate::Error::ChannelError) if the pool
    ///   cannot complete the work.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err(Display)))]
    pub async fn process_request(
        &self,
        query: Option<&str>,
        min: Option<&str>,
        max: Option<&str>,
    ) -> Result<ResponseBody> {
        match Request::from_params(query, min, max)? {
            Request::Single { query } => {
                let value = validate_integer(query)?;
                let output = roman::encode(value);

                #[cfg(feature = "tracing")]
                tracing::debug!("Converted {value} to {output}");

                Ok(ResponseBody::Single(SingleResult {
                    input: query.to_string(),
                    output,
                }))
            }
            Request::Range { min, max } => {
                let (min, max) = validate_range(min, max)?;
                let _guard = self.worker_pool.begin_request()?;
                let range = convert_range(min, max, self.config.chunk_size, &self.worker_pool)
                    .await?;
                Ok(ResponseBody::Range(range))
            }
        }
    }

    /// Initiates a graceful shutdown of the worker pool.
    ///
    /// In-flight range requests are given `shutdown_timeout` to finish; new
    /// range requests fail with
    /// [`ServiceShutdown`](crate::Error::ServiceShutdown).
    pub async fn shutdown(&self) -> Result<()> {
        self.worker_pool.shutdown().await
    }

    /// Whether [`shutdown`](Self::shutdown) has begun, i.e. range requests are
    /// no longer admitted. Stays `true` through the drain phase and after.
    pub fn is_shut_down(&self) -> bool {
        self.worker_pool.is_shut_down()
    }
}

impl core::fmt::Debug for RomanService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RomanService")
            .field("config", &self.config)
            .field("workers", &self.worker_pool.len())
            .field("inflight", &self.worker_pool.inflight())
            .finish()
    }
}
