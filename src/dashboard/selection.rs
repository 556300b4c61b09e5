//! Selection state
//!
//! The three user inputs that drive every derived view: the slider year,
//! the dropdown dataset, and the region last clicked on the map.

use super::error::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};

/// Indicator shown on the map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Dataset {
    #[default]
    #[serde(rename = "GDP per capita")]
    Gdp,
    #[serde(rename = "Waste per capita")]
    Waste,
}

impl Dataset {
    pub fn all() -> &'static [Dataset] {
        &[Dataset::Gdp, Dataset::Waste]
    }

    /// Dropdown value, also used in the map title
    pub fn value(&self) -> &'static str {
        match self {
            Dataset::Gdp => "GDP per capita",
            Dataset::Waste => "Waste per capita",
        }
    }

    /// Dropdown label
    pub fn label(&self) -> &'static str {
        match self {
            Dataset::Gdp => "Global GDP",
            Dataset::Waste => "Global Municipal Waste",
        }
    }

    /// Color bar title on the map
    pub fn colorbar_title(&self) -> &'static str {
        match self {
            Dataset::Gdp => "GDP per capita",
            Dataset::Waste => "kg of waste per capita",
        }
    }

    /// ColorBrewer sequential palette, light to dark
    pub fn palette(&self) -> &'static [&'static str] {
        match self {
            Dataset::Gdp => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
            Dataset::Waste => &[
                "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d",
                "#a50f15", "#67000d",
            ],
        }
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// Inclusive year range covered by the slider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 1975,
            max: 2020,
        }
    }
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn check(&self, year: i32) -> DashboardResult<i32> {
        if self.contains(year) {
            Ok(year)
        } else {
            Err(DashboardError::YearOutOfRange {
                year,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Current values of the dashboard inputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Selection {
    /// Slider year
    pub year: i32,
    /// Dropdown choice
    #[serde(default)]
    pub dataset: Dataset,
    /// Region name from the last map click, if any
    #[serde(default)]
    pub clicked_region: Option<String>,
}

impl Selection {
    pub fn new(year: i32, dataset: Dataset) -> Self {
        Self {
            year,
            dataset,
            clicked_region: None,
        }
    }

    pub fn clicked(mut self, region: impl Into<String>) -> Self {
        self.clicked_region = Some(region.into());
        self
    }

    /// The clicked region, ignoring blank clicks
    pub fn region(&self) -> Option<&str> {
        self.clicked_region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}
