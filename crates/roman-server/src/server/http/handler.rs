use super::error::ApiError;
use crate::server::telemetry::{
    increment_errors, increment_requests, record_conversions, record_request_duration,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use roman_core::{Error, ResponseBody, RomanService};
use std::time::Instant;

pub const WELCOME: &str = "Welcome to the Roman Numeral Converter API.<br>\
    Use /romannumeral?query=INPUT_NUMBER to convert a specific number to a Roman numeral.<br>\
    Alternatively, use /romannumeral?min=INPUT_NUMBER&max=INPUT_NUMBER to convert a range of numbers.";

/// Raw query parameters. Values stay strings: parsing is the service's job.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RomanParams {
    pub query: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
}

impl RomanParams {
    /// Picks `query`, `min` and `max` out of the decoded query pairs, ignoring
    /// any other key. A repeated key has its values joined with `,`, so
    /// `?query=1&query=2` reads as `"1,2"` and fails validation as input.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "query" => &mut params.query,
                "min" => &mut params.min,
                "max" => &mut params.max,
                _ => continue,
            };
            match slot.as_mut() {
                Some(joined) => {
                    joined.push(',');
                    joined.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }
        params
    }
}

/// `GET /`
pub async fn home() -> &'static str {
    WELCOME
}

/// `GET /health`
pub async fn health(State(service): State<RomanService>) -> (StatusCode, &'static str) {
    if service.is_shut_down() {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT_SERVING")
    } else {
        (StatusCode::OK, "SERVING")
    }
}

/// `GET /romannumeral?query=N` or `GET /romannumeral?min=A&max=B`
#[tracing::instrument(skip_all)]
pub async fn roman_numeral(
    State(service): State<RomanService>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ResponseBody>, ApiError> {
    let start = Instant::now();
    increment_requests();

    let result = match pairs {
        Ok(Query(pairs)) => {
            let params = RomanParams::from_pairs(pairs);
            tracing::info!(
                "Received request - query: {:?}, min: {:?}, max: {:?}",
                params.query,
                params.min,
                params.max
            );
            service
                .process_request(
                    params.query.as_deref(),
                    params.min.as_deref(),
                    params.max.as_deref(),
                )
                .await
        }
        Err(rejection) => {
            // Undecodable query string: neither mode can be resolved.
            tracing::info!("Rejected query string: {rejection}");
            Err(Error::InvalidParameters)
        }
    };

    record_request_duration(start.elapsed().as_secs_f64() * 1000.0);

    match result {
        Ok(body) => {
            match &body {
                ResponseBody::Single(_) => record_conversions(1, false),
                ResponseBody::Range(range) => record_conversions(range.len(), true),
            }
            Ok(Json(body))
        }
        Err(err) => {
            let err = ApiError(err);
            increment_errors(err.status().as_u16());
            if err.0.is_client_error() {
                tracing::debug!("Request failed: {}", err.0);
            } else {
                tracing::warn!("Request failed: {}", err.0);
            }
            Err(err)
        }
    }
}
