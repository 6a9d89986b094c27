//! Dashboard HTTP Server
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard page
//!
//! ## Data
//! - `GET /api/v1/countries` - Country list for the dropdown
//! - `GET /api/v1/overview` - Bubble map and global totals figures
//! - `GET /api/v1/selection?country=` - Selection-dependent figures
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use covid_dashboard::api::{serve, AppState};
//! use covid_dashboard::config::ApiConfig;
//! use covid_dashboard::dataset::{load, DatasetSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Arc::new(load(&DatasetSource::default())?);
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(dataset, config.clone())?;
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api_routes = Router::new()
        .route("/countries", get(routes::countries::list_countries))
        .route("/overview", get(routes::charts::overview))
        .route("/selection", get(routes::charts::selection));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the JSON API; no origins configured means same-origin only
/// and `*` allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);

    if origins.iter().any(|origin| origin.trim() == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(allowed)
}

/// Start the HTTP server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("COVID-19 Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("COVID-19 Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::provider::tests::sample_dataset;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(Arc::new(sample_dataset()), ApiConfig::default()).unwrap();
        build_router(state)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (status, body) = get_json(create_test_app(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["dataset"]["countries"], 3);
        assert_eq!(body["dataset"]["first_date"], "2020-03-01");
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("COVID-19 Dashboard"));
        assert!(html.contains("id=\"country-dropdown\""));
    }

    #[tokio::test]
    async fn test_list_countries() {
        let (status, body) = get_json(create_test_app(), "/api/v1/countries").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 3);
        assert_eq!(body["countries"], serde_json::json!(["Iceland", "Italy", "Spain"]));
    }

    #[tokio::test]
    async fn test_overview() {
        let (status, body) = get_json(create_test_app(), "/api/v1/overview").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bubble_map"]["data"][0]["type"], "scattergeo");
        assert_eq!(body["totals"]["layout"]["title"]["text"], "Total Global Cases");
        assert_eq!(
            body["totals"]["data"][0]["marker"]["color"],
            serde_json::json!(["#54a0ff", "#ee5253", "#1dd1a1"])
        );
    }

    #[tokio::test]
    async fn test_selection_global_when_absent() {
        let (status, body) = get_json(create_test_app(), "/api/v1/selection").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "Global");
        assert_eq!(body["time_series"]["layout"]["title"]["text"], "Global Cases Graph");
        assert_eq!(body["totals"]["layout"]["title"]["text"], "Total Global Cases");
    }

    #[tokio::test]
    async fn test_selection_country() {
        let (status, body) = get_json(create_test_app(), "/api/v1/selection?country=Italy").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["time_series"]["layout"]["title"]["text"], "Italy Cases Graph");
        assert_eq!(body["totals"]["layout"]["title"]["text"], "Total Italy Cases");
        assert_eq!(body["summary"]["confirmed"], 1_694 + 2_036 + 2_502);
        assert_eq!(
            body["totals"]["data"][0]["y"],
            serde_json::json!([6_232, 165, 392])
        );
    }

    #[tokio::test]
    async fn test_selection_encoded_name() {
        let app = AppState::new(
            Arc::new(
                crate::dataset::Dataset::from_records(vec![crate::dataset::CaseRecord::new(
                    "United Kingdom",
                    crate::dataset::provider::tests::date(3, 1),
                    36,
                    0,
                    8,
                )])
                .unwrap(),
            ),
            ApiConfig::default(),
        )
        .map(build_router)
        .unwrap();

        let (status, body) = get_json(app, "/api/v1/selection?country=United%20Kingdom").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["label"], "United Kingdom");
    }

    #[tokio::test]
    async fn test_selection_unknown_country() {
        let (status, body) = get_json(create_test_app(), "/api/v1/selection?country=Atlantis").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "LOOKUP_FAILURE");
        assert!(body.get("time_series").is_none());
        assert!(body["request_id"].is_string());
    }

    #[test]
    fn test_invalid_cors_origin_is_skipped() {
        // Must not panic on a header value containing a newline
        let _ = cors_layer(&["http://localhost:8050".to_string(), "bad\norigin".to_string()]);
    }

    fn app_with_origins(origins: &[&str]) -> Router {
        let config = ApiConfig {
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..ApiConfig::default()
        };
        build_router(AppState::new(Arc::new(sample_dataset()), config).unwrap())
    }

    async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_wildcard_cors_origin_allows_any() {
        let app = app_with_origins(&["http://localhost:3000", "*"]);

        let allowed = allowed_origin(app, "http://example.org").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_listed_cors_origin_is_echoed() {
        let app = app_with_origins(&["http://localhost:3000"]);
        let allowed = allowed_origin(app, "http://localhost:3000").await;
        assert_eq!(allowed.as_deref(), Some("http://localhost:3000"));

        let app = app_with_origins(&["http://localhost:3000"]);
        assert_eq!(allowed_origin(app, "http://example.org").await, None);
    }
}
