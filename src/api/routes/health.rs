//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Ready once both tables hold at least one row.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if tables_loaded(&state) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
///
/// Full health status with table sizes.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let datasets = state.dashboard.datasets();

    let status = if tables_loaded(&state) {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        gdp_rows: datasets.gdp.len(),
        waste_rows: datasets.waste.len(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn tables_loaded(state: &AppState) -> bool {
    let datasets = state.dashboard.datasets();
    !datasets.gdp.is_empty() && !datasets.waste.is_empty()
}
