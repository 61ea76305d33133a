use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roman_core::Error;

/// HTTP rendering of [`roman_core::Error`].
///
/// Every failure becomes a plain-text `Error: <message>` body. Validation
/// failures map to `400`, a shutting-down pool to `503`, and internal channel
/// failures to `500`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            Error::ServiceShutdown => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), format!("Error: {}", self.0)).into_response()
    }
}
