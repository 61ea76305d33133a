use crate::ConversionResult;
use tokio::sync::oneshot;

/// A message sent from the [`WorkerPool`](super::WorkerPool) to an individual
/// worker task.
#[derive(Debug)]
pub enum WorkRequest {
    /// Convert every integer in `start..=end`, which the caller has already
    /// validated, and reply with the results in ascending order.
    Convert {
        start: u16,
        end: u16,
        response: oneshot::Sender<Vec<ConversionResult>>,
    },

    /// Request the worker to stop. The worker acknowledges on `response` once
    /// it has left its receive loop.
    Shutdown { response: oneshot::Sender<()> },
}
