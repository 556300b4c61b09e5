//! Dashboard
//!
//! The reactive core of the page: selection state, the four handlers that
//! derive titles and figures from it, and the component tree that hosts them.
//!
//! - **selection**: Dataset choice, slider range, current selection
//! - **callbacks**: Handler table and `Dashboard::update`
//! - **figures**: Plotly figure builders
//! - **layout**: Component tree and the HTML page
//! - **error**: Error types

pub mod callbacks;
pub mod error;
pub mod figures;
pub mod layout;
pub mod selection;

pub use callbacks::{
    comparison_title, map_title, Callback, Dashboard, InputId, OutputId, OutputValue, Outputs,
    CALLBACKS,
};
pub use error::{DashboardError, DashboardResult};
pub use figures::Figure;
pub use layout::{render_page, Layout};
pub use selection::{Dataset, Selection, YearRange};

use serde::Deserialize;

/// Tunables for the dashboard page
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DashboardSettings {
    /// Page heading
    #[serde(default = "default_heading")]
    pub heading: String,

    /// Slider bounds
    #[serde(default)]
    pub years: YearRange,

    /// Slider position on first load
    #[serde(default = "default_year")]
    pub default_year: i32,

    /// Distance between labelled slider marks
    #[serde(default = "default_mark_step")]
    pub mark_step: i32,

    /// Region looked up in the tables before any click
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Region shown in the comparison title before any click
    #[serde(default = "default_region_label")]
    pub default_region_label: String,

    /// Plotly.js bundle loaded by the page
    #[serde(default = "default_plotly_src")]
    pub plotly_src: String,
}

fn default_heading() -> String {
    "Contrasting Global GDP and Municipal Waste".to_string()
}

fn default_year() -> i32 {
    1975
}

fn default_mark_step() -> i32 {
    5
}

fn default_region() -> String {
    "United States".to_string()
}

fn default_region_label() -> String {
    "United States of America".to_string()
}

fn default_plotly_src() -> String {
    "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string()
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            heading: default_heading(),
            years: YearRange::default(),
            default_year: default_year(),
            mark_step: default_mark_step(),
            default_region: default_region(),
            default_region_label: default_region_label(),
            plotly_src: default_plotly_src(),
        }
    }
}
