use core::time::Duration;

/// Tuning for the range-conversion worker pool.
///
/// Built by the server from its CLI/env configuration; library users and tests
/// can start from [`ServiceConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Number of worker tasks. Defaults to the number of logical CPUs.
    pub num_workers: usize,
    /// Integers converted per unit of work dispatched to a worker.
    pub chunk_size: usize,
    /// Capacity of each worker's inbound queue.
    pub worker_queue_size: usize,
    /// How long [`shutdown`](crate::RomanService::shutdown) waits for
    /// in-flight requests before cancelling.
    pub shutdown_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get().max(1),
            chunk_size: 64,
            worker_queue_size: 1,
            shutdown_timeout: Duration::from_secs(3),
        }
    }
}
