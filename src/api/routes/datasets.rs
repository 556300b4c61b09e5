//! Dataset Routes
//!
//! - GET /api/v1/datasets - Sizes and load reports of both tables

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{DatasetsResponse, TableSummary};
use crate::api::state::AppState;

/// GET /api/v1/datasets
pub async fn list_datasets(State(state): State<Arc<AppState>>) -> Json<DatasetsResponse> {
    let datasets = state.dashboard.datasets();
    Json(DatasetsResponse {
        gdp: TableSummary::from(&datasets.gdp),
        waste: TableSummary::from(&datasets.waste),
    })
}
