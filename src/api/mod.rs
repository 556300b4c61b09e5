//! Wastemap HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Dashboard page
//!
//! ## Dashboard
//! - `GET /api/v1/layout` - Component tree
//! - `POST /api/v1/update` - Recompute outputs for changed inputs
//! - `GET /api/v1/datasets` - Loaded table summaries
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use wastemap::api::{serve, AppState};
//! use wastemap::config::Config;
//! use wastemap::dashboard::Dashboard;
//! use wastemap::data::Datasets;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let datasets = Datasets::load(
//!         &config.data.gdp_path,
//!         config.data.gdp_filter.clone(),
//!         &config.data.waste_path,
//!         config.data.waste_filter.clone(),
//!         &config.data.columns,
//!     )?;
//!     let dashboard = Dashboard::new(Arc::new(datasets), config.dashboard.clone());
//!
//!     let state = AppState::new(dashboard, config.api.clone());
//!     serve(state).await?;
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
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/layout", get(routes::dashboard::layout))
        .route("/update", post(routes::dashboard::update))
        .route("/datasets", get(routes::datasets::list_datasets));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::dashboard::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured, otherwise an allow-list
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Wastemap dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Wastemap dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
    use crate::config::ApiConfig;
    use crate::dashboard::{Dashboard, DashboardSettings};
    use crate::data::{Datasets, IndicatorTable, Observation};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app_with(datasets: Datasets) -> Router {
        let dashboard = Dashboard::new(Arc::new(datasets), DashboardSettings::default());
        build_router(AppState::new(dashboard, ApiConfig::default()))
    }

    fn create_test_app() -> Router {
        let gdp = IndicatorTable::from_rows(
            "GDP per capita",
            vec![
                Observation::new("USA", "United States", 1975, 7800.0),
                Observation::new("USA", "United States", 1976, 8600.0),
                Observation::new("USA", "United States", 1977, 9400.0),
                Observation::new("JPN", "Japan", 1975, 4600.0),
                Observation::new("JPN", "Japan", 1976, 5100.0),
            ],
        );
        let waste = IndicatorTable::from_rows(
            "Waste per capita",
            vec![
                Observation::new("USA", "United States", 1976, 700.0),
                Observation::new("USA", "United States", 1975, 690.0),
                Observation::new("JPN", "Japan", 1976, 360.0),
            ],
        );
        create_test_app_with(Datasets::new(gdp, waste))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn update_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/update")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
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
    async fn test_health_not_ready_without_rows() {
        let app = create_test_app_with(Datasets::new(
            IndicatorTable::from_rows("gdp", Vec::new()),
            IndicatorTable::from_rows("waste", Vec::new()),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["gdp_rows"], 5);
        assert_eq!(body["waste_rows"], 3);
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Contrasting Global GDP and Municipal Waste"));
    }

    #[tokio::test]
    async fn test_layout() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/layout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["slider"]["id"], "time-bar");
        assert_eq!(body["dropdown"]["options"][0]["value"], "GDP per capita");
    }

    #[tokio::test]
    async fn test_datasets() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/datasets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["gdp"]["rows"], 5);
        assert_eq!(body["gdp"]["regions"], 2);
        assert_eq!(body["gdp"]["periods"], serde_json::json!([1975, 1977]));
        assert_eq!(body["waste"]["load"]["rows_kept"], 3);
    }

    #[tokio::test]
    async fn test_update_initial_render() {
        let app = create_test_app();

        let response = app
            .oneshot(update_request(
                r#"{"selection": {"year": 1975, "dataset": "GDP per capita"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let outputs = &body_json(response).await["outputs"];
        assert_eq!(outputs["choropleth-title"], "Global GDP per capita in 1975");
        assert_eq!(
            outputs["comparison-title"],
            "GDP Versus Municipal Waste in United States of America"
        );
        assert_eq!(
            outputs["choropleth"]["data"][0]["locations"],
            serde_json::json!(["USA", "JPN"])
        );
        assert_eq!(
            outputs["comparison-line"]["data"][0]["x"],
            serde_json::json!([1975, 1976])
        );
    }

    #[tokio::test]
    async fn test_update_map_click() {
        let app = create_test_app();

        let response = app
            .oneshot(update_request(
                r#"{"selection": {"year": 1976, "dataset": "Waste per capita", "clicked_region": "Japan"}, "changed": ["choropleth.clickData"]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let outputs = &body_json(response).await["outputs"];
        assert_eq!(outputs["comparison-title"], "GDP Versus Municipal Waste in Japan");
        assert_eq!(
            outputs["comparison-line"]["data"][1]["y"],
            serde_json::json!([360.0])
        );
        assert!(outputs.get("choropleth").is_none());
    }

    #[tokio::test]
    async fn test_update_year_out_of_range() {
        let app = create_test_app();

        let response = app
            .oneshot(update_request(r#"{"selection": {"year": 2050}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "SELECTION_ERROR");
    }

    #[tokio::test]
    async fn test_update_unknown_dataset() {
        let app = create_test_app();

        let response = app
            .oneshot(update_request(
                r#"{"selection": {"year": 2000, "dataset": "Population"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_update_invalid_json() {
        let app = create_test_app();

        let response = app.oneshot(update_request("not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_BODY");
    }
}
