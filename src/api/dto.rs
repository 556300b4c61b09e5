//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::dashboard::{InputId, Outputs, Selection};
use crate::data::{IndicatorTable, LoadReport};
use serde::{Deserialize, Serialize};

// ============================================
// UPDATE DTOs
// ============================================

/// Input change pushed by the page
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Current values of all inputs
    pub selection: Selection,
    /// Inputs that changed; omitted on initial render
    #[serde(default)]
    pub changed: Option<Vec<InputId>>,
}

/// Recomputed outputs keyed by component id
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub outputs: Outputs,
}

// ============================================
// DATASET DTOs
// ============================================

/// Summary of one loaded table
#[derive(Debug, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub regions: usize,
    /// First and last year present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<(i32, i32)>,
    pub load: LoadReport,
}

impl From<&IndicatorTable> for TableSummary {
    fn from(table: &IndicatorTable) -> Self {
        let periods = table.periods();
        Self {
            name: table.name().to_string(),
            rows: table.len(),
            regions: table.regions().len(),
            periods: periods.first().copied().zip(periods.last().copied()),
            load: table.report(),
        }
    }
}

/// Both loaded tables
#[derive(Debug, Serialize)]
pub struct DatasetsResponse {
    pub gdp: TableSummary,
    pub waste: TableSummary,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    pub gdp_rows: usize,
    pub waste_rows: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
