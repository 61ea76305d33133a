//! HTTP surface of the service.
//!
//! - [`handler`] - route handlers.
//! - [`error`] - [`ApiError`](error::ApiError), the `IntoResponse` rendering of
//!   service errors.

pub mod error;
pub mod handler;

use axum::{Router, routing::get};
use roman_core::RomanService;
use tower_http::cors::{Any, CorsLayer};

/// Builds the application router around a running [`RomanService`].
pub fn router(service: RomanService) -> Router {
    Router::new()
        .route("/", get(handler::home))
        .route("/health", get(handler::health))
        .route("/romannumeral", get(handler::roman_numeral))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use core::time::Duration;
    use roman_core::ServiceConfig;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> (Router, RomanService) {
        let service = RomanService::new(ServiceConfig {
            num_workers: 2,
            chunk_size: 2,
            worker_queue_size: 1,
            shutdown_timeout: Duration::from_millis(100),
        });
        (router(service.clone()), service)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn home_shows_usage() {
        let (app, _) = app();
        let (status, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            "Welcome to the Roman Numeral Converter API.<br>\
             Use /romannumeral?query=INPUT_NUMBER to convert a specific number to a Roman numeral.<br>\
             Alternatively, use /romannumeral?min=INPUT_NUMBER&max=INPUT_NUMBER to convert a range of numbers."
        );
    }

    #[tokio::test]
    async fn single_query() {
        let (app, _) = app();
        let (status, body) = get(app, "/romannumeral?query=1").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, json!({"input": "1", "output": "I"}));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn range_query() {
        let (app, _) = app();
        let (status, body) = get(app, "/romannumeral?min=1&max=5").await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            body,
            json!({"conversions": [
                {"input": "1", "output": "I"},
                {"input": "2", "output": "II"},
                {"input": "3", "output": "III"},
                {"input": "4", "output": "IV"},
                {"input": "5", "output": "V"},
            ]})
        );
    }

    #[tokio::test]
    async fn invalid_parameters() {
        let (app, _) = app();
        let expected =
            "Error: Invalid parameters. Please provide either 'query' or both 'min' and 'max'.";

        for uri in [
            "/romannumeral?query=1&min=5&max=1",
            "/romannumeral",
            "/romannumeral?min=5",
            "/romannumeral?other=1",
        ] {
            let (status, body) = get(app.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn invalid_range() {
        let (app, _) = app();
        let (status, body) = get(app, "/romannumeral?min=5&max=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Error: Invalid range: 'min' should be less than 'max'.");
    }

    #[tokio::test]
    async fn invalid_values() {
        let (app, _) = app();
        for (uri, expected) in [
            ("/romannumeral?query=0", "Error: Number out of range. must be between 1 and 3999"),
            ("/romannumeral?query=4000", "Error: Number out of range. must be between 1 and 3999"),
            ("/romannumeral?query=-5", "Error: Invalid input"),
            ("/romannumeral?query=1%2B1", "Error: Invalid input"),
            ("/romannumeral?query=", "Error: Invalid input"),
            ("/romannumeral?min=0&max=4", "Error: Number out of range. must be between 1 and 3999"),
            // Repeated parameters are joined with ',' before validation.
            ("/romannumeral?query=1&query=2", "Error: Invalid input"),
            ("/romannumeral?min=1&min=2&max=5", "Error: Invalid input"),
        ] {
            let (status, body) = get(app.clone(), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn health_follows_shutdown() {
        let (app, service) = app();
        assert_eq!(get(app.clone(), "/health").await, (StatusCode::OK, "SERVING".to_string()));

        service.shutdown().await.unwrap();

        assert_eq!(
            get(app.clone(), "/health").await,
            (StatusCode::SERVICE_UNAVAILABLE, "NOT_SERVING".to_string())
        );
        let (status, body) = get(app, "/romannumeral?min=1&max=3").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, "Error: Service is shutting down");
    }
}
