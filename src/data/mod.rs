//! Indicator Data
//!
//! Loading, filtering and joining of the two indicator tables:
//!
//! - **types**: Observation rows, column names, unit filter, load reports
//! - **table**: CSV loader and the immutable `IndicatorTable`
//! - **join**: Inner join of two tables on the time period
//! - **error**: Error types
//!
//! Both tables are read once at startup and shared read-only afterwards.

pub mod error;
pub mod join;
pub mod table;
pub mod types;

pub use error::{DataError, DataResult};
pub use join::{join_on_period, JoinedRow, JoinedTable};
pub use table::{IndicatorTable, TableLoader};
pub use types::{Columns, LoadReport, Observation, UnitFilter};

use std::path::Path;

/// The two working tables behind the dashboard
#[derive(Debug, Clone)]
pub struct Datasets {
    /// GDP per capita, current prices
    pub gdp: IndicatorTable,
    /// Municipal waste per capita, kilogrammes per person
    pub waste: IndicatorTable,
}

impl Datasets {
    pub fn new(gdp: IndicatorTable, waste: IndicatorTable) -> Self {
        Self { gdp, waste }
    }

    /// Load both tables from disk with the given unit filters
    pub fn load(
        gdp_path: &Path,
        gdp_filter: UnitFilter,
        waste_path: &Path,
        waste_filter: UnitFilter,
        columns: &Columns,
    ) -> DataResult<Self> {
        let gdp = TableLoader::new("GDP per capita", gdp_filter)
            .with_columns(columns.clone())
            .load(gdp_path)?;
        let waste = TableLoader::new("Waste per capita", waste_filter)
            .with_columns(columns.clone())
            .load(waste_path)?;
        Ok(Self { gdp, waste })
    }

    /// Restrict both tables to one region and join them on period
    pub fn compare_region(&self, region_name: &str) -> JoinedTable {
        let gdp = self.gdp.rows_for_region(region_name);
        let waste = self.waste.rows_for_region(region_name);
        join_on_period(&gdp, &waste)
    }
}
