//! # Wastemap
//!
//! Interactive dashboard contrasting per-capita GDP and per-capita municipal
//! waste: a world choropleth of either indicator for a chosen year, and a
//! dual-axis comparison of both indicators over time for a clicked country.
//!
//! ## Modules
//!
//! - [`data`]: Loading, unit filtering and period joins of the two tables
//! - [`dashboard`]: Selection state, reactive handlers, figures and page layout
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wastemap::dashboard::{Dashboard, DashboardSettings, Dataset, Selection};
//! use wastemap::data::{Datasets, TableLoader, UnitFilter};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gdp = TableLoader::new("GDP per capita", UnitFilter::gdp_current_prices())
//!         .load("GDP_Data.csv".as_ref())?;
//!     let waste = TableLoader::new("Waste per capita", UnitFilter::waste_per_person())
//!         .load("Waste_Data.csv".as_ref())?;
//!
//!     let dashboard = Dashboard::new(
//!         Arc::new(Datasets::new(gdp, waste)),
//!         DashboardSettings::default(),
//!     );
//!
//!     let selection = Selection::new(2010, Dataset::Waste).clicked("Japan");
//!     let outputs = dashboard.update(&selection, None)?;
//!     println!("{} outputs recomputed", outputs.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod data;

pub use data::{
    join_on_period, DataError, DataResult, Datasets, IndicatorTable, JoinedRow, JoinedTable,
    LoadReport, Observation, TableLoader, UnitFilter,
};

pub use dashboard::{
    Dashboard, DashboardError, DashboardSettings, Dataset, Figure, InputId, Layout, OutputId,
    OutputValue, Selection,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, ConfigSource, DataConfig, LoggingConfig};
