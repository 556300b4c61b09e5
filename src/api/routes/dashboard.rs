//! Dashboard Routes
//!
//! - GET / - The dashboard page
//! - GET /api/v1/layout - Component tree as JSON
//! - POST /api/v1/update - Recompute outputs after an input change

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{UpdateRequest, UpdateResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::Layout;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.as_str().to_owned())
}

/// GET /api/v1/layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<Layout> {
    Json(state.layout.as_ref().clone())
}

/// POST /api/v1/update
///
/// Runs the handlers whose inputs are listed in `changed` (all of them when
/// `changed` is omitted) and returns their outputs.
pub async fn update(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    let Json(request) = payload?;

    let outputs = state
        .dashboard
        .update(&request.selection, request.changed.as_deref())?;

    tracing::debug!(
        year = request.selection.year,
        dataset = %request.selection.dataset,
        region = ?request.selection.region(),
        outputs = outputs.len(),
        "Dashboard updated"
    );

    Ok(Json(UpdateResponse { outputs }))
}
