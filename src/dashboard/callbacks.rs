//! Reactive callbacks
//!
//! Each output of the page is recomputed by one handler from a declared set
//! of inputs. `Dashboard::update` runs exactly the handlers whose inputs
//! changed and returns their fresh outputs keyed by component id.
//!
//! ```text
//! time-bar ─────────┬──► choropleth-title
//! dataset-dropdown ─┼──► choropleth
//!                   │
//! choropleth.click ─┼──► comparison-title
//!                   └──► comparison-line   (also reads time-bar)
//! ```

use super::error::DashboardResult;
use super::figures::{self, Figure};
use super::selection::{Dataset, Selection};
use super::DashboardSettings;
use crate::data::Datasets;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Components whose value the user can change
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputId {
    #[serde(rename = "time-bar")]
    TimeBar,
    #[serde(rename = "dataset-dropdown")]
    DatasetDropdown,
    #[serde(rename = "choropleth.clickData")]
    ChoroplethClick,
}

/// Components whose content the handlers produce
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputId {
    #[serde(rename = "choropleth-title")]
    ChoroplethTitle,
    #[serde(rename = "choropleth")]
    Choropleth,
    #[serde(rename = "comparison-title")]
    ComparisonTitle,
    #[serde(rename = "comparison-line")]
    ComparisonLine,
}

/// A handler's declared dependencies
#[derive(Debug, Clone, Copy)]
pub struct Callback {
    pub output: OutputId,
    pub inputs: &'static [InputId],
}

impl Callback {
    pub fn depends_on(&self, changed: &[InputId]) -> bool {
        self.inputs.iter().any(|i| changed.contains(i))
    }
}

pub const CALLBACKS: [Callback; 4] = [
    Callback {
        output: OutputId::ChoroplethTitle,
        inputs: &[InputId::TimeBar, InputId::DatasetDropdown],
    },
    Callback {
        output: OutputId::Choropleth,
        inputs: &[InputId::TimeBar, InputId::DatasetDropdown],
    },
    Callback {
        output: OutputId::ComparisonTitle,
        inputs: &[InputId::ChoroplethClick],
    },
    Callback {
        output: OutputId::ComparisonLine,
        inputs: &[InputId::ChoroplethClick, InputId::TimeBar],
    },
];

/// Fresh content for one output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OutputValue {
    Text(String),
    Figure(Figure),
}

impl OutputValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutputValue::Text(s) => Some(s),
            OutputValue::Figure(_) => None,
        }
    }

    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            OutputValue::Figure(f) => Some(f),
            OutputValue::Text(_) => None,
        }
    }
}

pub type Outputs = BTreeMap<OutputId, OutputValue>;

/// Map title for a year and dataset
pub fn map_title(year: i32, dataset: Dataset) -> String {
    format!("Global {} in {}", dataset, year)
}

/// Comparison title for a region
pub fn comparison_title(region: &str) -> String {
    format!("GDP Versus Municipal Waste in {}", region)
}

/// Handlers over the shared, immutable tables
#[derive(Debug, Clone)]
pub struct Dashboard {
    datasets: Arc<Datasets>,
    settings: DashboardSettings,
}

impl Dashboard {
    pub fn new(datasets: Arc<Datasets>, settings: DashboardSettings) -> Self {
        Self { datasets, settings }
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Selection shown before the user touches anything
    pub fn initial_selection(&self) -> Selection {
        Selection::new(self.settings.default_year, Dataset::default())
    }

    pub fn map_title(&self, year: i32, dataset: Dataset) -> String {
        map_title(year, dataset)
    }

    pub fn map_figure(&self, year: i32, dataset: Dataset) -> Figure {
        let table = match dataset {
            Dataset::Gdp => &self.datasets.gdp,
            Dataset::Waste => &self.datasets.waste,
        };
        let rows = table.rows_for_period(year);
        tracing::debug!(year, %dataset, regions = rows.len(), "Building map figure");
        figures::choropleth(&rows, dataset)
    }

    /// Title for the clicked region, or the default label when nothing was clicked
    pub fn comparison_title(&self, clicked: Option<&str>) -> String {
        comparison_title(clicked.unwrap_or(self.settings.default_region_label.as_str()))
    }

    /// Comparison chart for the clicked region, or the default region
    pub fn comparison_figure(&self, clicked: Option<&str>, year: i32) -> Figure {
        let region = clicked.unwrap_or(self.settings.default_region.as_str());
        let joined = self.datasets.compare_region(region);
        tracing::debug!(
            region,
            year,
            periods = joined.len(),
            dropped_gdp = joined.dropped_left,
            dropped_waste = joined.dropped_right,
            "Building comparison figure"
        );
        figures::comparison(&joined, year)
    }

    /// Recompute the outputs affected by `changed`
    ///
    /// `None` means the initial render: every output is computed.
    pub fn update(
        &self,
        selection: &Selection,
        changed: Option<&[InputId]>,
    ) -> DashboardResult<Outputs> {
        let year = self.settings.years.check(selection.year)?;
        let region = selection.region();

        let mut outputs = Outputs::new();
        for callback in CALLBACKS.iter() {
            if let Some(changed) = changed {
                if !callback.depends_on(changed) {
                    continue;
                }
            }

            let value = match callback.output {
                OutputId::ChoroplethTitle => {
                    OutputValue::Text(self.map_title(year, selection.dataset))
                }
                OutputId::Choropleth => {
                    OutputValue::Figure(self.map_figure(year, selection.dataset))
                }
                OutputId::ComparisonTitle => OutputValue::Text(self.comparison_title(region)),
                OutputId::ComparisonLine => {
                    OutputValue::Figure(self.comparison_figure(region, year))
                }
            };
            outputs.insert(callback.output, value);
        }

        Ok(outputs)
    }
}
