//! Error types for the Roman numeral service.
//!
//! The first four variants are input-validation failures: deterministic,
//! caller-caused and never retryable. The remaining two originate in the
//! worker pool and indicate the service itself could not complete the request.
//!
//! ## Error Cases
//! - `InvalidParameters`: the supplied parameters match neither single nor
//!   range mode.
//! - `InvalidInput`: a parameter is not a plain non-negative integer literal.
//! - `OutOfRange`: a well-formed integer falls outside `1..=3999`.
//! - `InvalidRange`: both bounds are valid but `min >= max`.
//! - `ChannelError`: internal communication failure between tasks.
//! - `ServiceShutdown`: a request arrived while the pool was shutting down.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for request processing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Neither exactly `query`, nor exactly `min` and `max`, were supplied.
    #[error("Invalid parameters. Please provide either 'query' or both 'min' and 'max'.")]
    InvalidParameters,

    /// The raw value does not match `^(0|[1-9][0-9]*)$`.
    #[error("Invalid input")]
    InvalidInput,

    /// The value parsed but lies outside `1..=3999`.
    #[error("Number out of range. must be between {} and {}", roman::MIN, roman::MAX)]
    OutOfRange,

    /// Both bounds parsed, but `min` is not strictly less than `max`.
    #[error("Invalid range: 'min' should be less than 'max'.")]
    InvalidRange,

    /// Internal channel send/receive failure (e.g., a worker went away).
    #[error("Channel error: {context}")]
    ChannelError { context: String },

    /// The service is in the process of shutting down.
    #[error("Service is shutting down")]
    ServiceShutdown,
}

impl Error {
    /// Returns `true` for failures caused by the request itself rather than by
    /// the service.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameters | Self::InvalidInput | Self::OutOfRange | Self::InvalidRange
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_wire_contract() {
        assert_eq!(
            Error::InvalidParameters.to_string(),
            "Invalid parameters. Please provide either 'query' or both 'min' and 'max'."
        );
        assert_eq!(Error::InvalidInput.to_string(), "Invalid input");
        assert_eq!(
            Error::OutOfRange.to_string(),
            "Number out of range. must be between 1 and 3999"
        );
        assert_eq!(
            Error::InvalidRange.to_string(),
            "Invalid range: 'min' should be less than 'max'."
        );
    }

    #[test]
    fn client_errors_are_distinguished() {
        assert!(Error::InvalidInput.is_client_error());
        assert!(Error::InvalidRange.is_client_error());
        assert!(!Error::ServiceShutdown.is_client_error());
        assert!(
            !Error::ChannelError {
                context: "worker 0 closed".to_string()
            }
            .is_client_error()
        );
    }
}
