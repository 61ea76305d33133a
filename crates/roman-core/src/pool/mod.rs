//! Worker pool and the range coordinator that feeds it.
//!
//! - [`manager`] - [`WorkerPool`]: round-robin dispatch, in-flight tracking
//!   and graceful shutdown.
//! - [`worker`] - the per-worker receive loop.
//! - [`coordinator`] - splits a range into chunks, fans them out, joins and
//!   sorts the results.
//! - [`request`] - the [`WorkRequest`] message protocol.

pub mod coordinator;
pub mod manager;
pub mod request;
pub mod worker;

pub use coordinator::convert_range;
pub use manager::{InflightGuard, WorkerPool};
pub use request::WorkRequest;
