//! Dashboard error types

use thiserror::Error;

/// Errors raised when a selection cannot be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Slider year outside the configured range
    #[error("Year {year} is outside the range {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
