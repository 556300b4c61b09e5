//! Core data types for the indicator tables
//!
//! - `Observation`: one (region, period, value) row kept after filtering
//! - `Columns`: header names used to locate fields in the CSV files
//! - `UnitFilter`: the unit-of-measure predicate applied at load time
//! - `LoadReport`: row counts gathered while loading a table

use serde::{Deserialize, Serialize};

/// A single observation of an indicator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// ISO 3166 alpha-3 region code (`REF_AREA`)
    pub region_code: String,
    /// Human-readable region name (`Reference area`)
    pub region_name: String,
    /// Calendar year of the observation
    pub period: i32,
    /// Observed value in the table's unit of measure
    pub value: f64,
}

impl Observation {
    /// Create a new observation
    pub fn new(
        region_code: impl Into<String>,
        region_name: impl Into<String>,
        period: i32,
        value: f64,
    ) -> Self {
        Self {
            region_code: region_code.into(),
            region_name: region_name.into(),
            period,
            value,
        }
    }
}

/// Header names of the columns every indicator table needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Columns {
    pub region_code: String,
    pub region_name: String,
    pub period: String,
    pub value: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            region_code: "REF_AREA".to_string(),
            region_name: "Reference area".to_string(),
            period: "TIME_PERIOD".to_string(),
            value: "OBS_VALUE".to_string(),
        }
    }
}

/// Keeps only the rows whose `column` equals `accepted`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnitFilter {
    /// Header of the unit-of-measure column
    pub column: String,
    /// Value a row must carry in that column to be kept
    pub accepted: String,
}

impl UnitFilter {
    pub fn new(column: impl Into<String>, accepted: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            accepted: accepted.into(),
        }
    }

    /// GDP rows priced at current prices (`PRICE_BASE == "V"`)
    pub fn gdp_current_prices() -> Self {
        Self::new("PRICE_BASE", "V")
    }

    /// Waste rows measured per person (`Unit of measure == "Kilogrammes per person"`)
    pub fn waste_per_person() -> Self {
        Self::new("Unit of measure", "Kilogrammes per person")
    }

    /// Check whether a raw cell value passes the filter
    pub fn accepts(&self, cell: &str) -> bool {
        cell.trim() == self.accepted
    }
}

/// Row counts from loading one table
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LoadReport {
    /// Records read from the file (header excluded)
    pub rows_read: usize,
    /// Records that passed the unit filter and parsed cleanly
    pub rows_kept: usize,
    /// Records rejected by the unit filter
    pub rows_filtered: usize,
    /// Records that passed the filter but could not be parsed
    pub rows_skipped: usize,
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} read, {} kept, {} filtered, {} skipped",
            self.rows_read, self.rows_kept, self.rows_filtered, self.rows_skipped
        )
    }
}
