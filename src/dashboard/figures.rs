//! Figure builders
//!
//! Produces Plotly figure documents (`{ data, layout }`) for the two charts.
//! The browser hands them to `Plotly.react` unchanged.

use super::selection::Dataset;
use crate::data::{JoinedTable, Observation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const MAP_MARGIN: u32 = 50;

/// A Plotly figure: traces plus layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    /// Number of points across all traces that carry an `x` or `z` array
    pub fn point_count(&self) -> usize {
        self.data
            .iter()
            .filter_map(|t| t.get("z").or_else(|| t.get("x")))
            .filter_map(Value::as_array)
            .map(Vec::len)
            .sum()
    }
}

/// Colorscale as `[[position, color], ...]` spread evenly over [0, 1]
fn colorscale(dataset: Dataset) -> Value {
    let palette = dataset.palette();
    let last = (palette.len() - 1) as f64;
    let stops: Vec<Value> = palette
        .iter()
        .enumerate()
        .map(|(i, color)| json!([i as f64 / last, color]))
        .collect();
    Value::Array(stops)
}

/// World choropleth of one dataset in one year
///
/// Regions are located by their ISO-3 code and labelled by name. The name
/// is carried as `hovertext` so a click on the map reports it back.
pub fn choropleth(rows: &[&Observation], dataset: Dataset) -> Figure {
    let locations: Vec<&str> = rows.iter().map(|o| o.region_code.as_str()).collect();
    let names: Vec<&str> = rows.iter().map(|o| o.region_name.as_str()).collect();
    let values: Vec<f64> = rows.iter().map(|o| o.value).collect();
    let customdata: Vec<Value> = names.iter().map(|n| json!([n])).collect();

    let trace = json!({
        "type": "choropleth",
        "geo": "geo",
        "name": "",
        "locations": locations,
        "z": values,
        "hovertext": names,
        "customdata": customdata,
        "coloraxis": "coloraxis",
        "hovertemplate": "<b>%{hovertext}</b><br><br>Reference area=%{customdata[0]}<br>OBS_VALUE=%{z}<extra></extra>",
    });

    let layout = json!({
        "coloraxis": {
            "colorscale": colorscale(dataset),
            "colorbar": { "title": { "text": dataset.colorbar_title() } },
        },
        "geo": {
            "scope": "world",
            "projection": { "type": "natural earth" },
        },
        "margin": { "l": MAP_MARGIN, "r": MAP_MARGIN, "t": MAP_MARGIN, "b": MAP_MARGIN },
        "legend": { "tracegroupgap": 0 },
    });

    Figure {
        data: vec![trace],
        layout,
    }
}

/// Dual-axis line chart of GDP (left axis) against waste (right axis)
///
/// A dashed vertical marker sits at `year`. The x-axis spans the joined
/// periods; with no rows it is left to autorange.
pub fn comparison(joined: &JoinedTable, year: i32) -> Figure {
    let periods = joined.periods();

    let gdp = json!({
        "type": "scatter",
        "mode": "lines",
        "name": "GDP per capita",
        "x": periods,
        "y": joined.left_values(),
        "yaxis": "y",
        "showlegend": false,
    });
    let waste = json!({
        "type": "scatter",
        "mode": "lines",
        "name": "Waste per capita",
        "x": periods,
        "y": joined.right_values(),
        "yaxis": "y2",
        "showlegend": false,
    });

    let mut xaxis = json!({ "title": { "text": "year" } });
    if let Some((first, last)) = joined.period_bounds() {
        xaxis["range"] = json!([first, last]);
    }

    let layout = json!({
        "shapes": [{
            "type": "line",
            "x0": year,
            "x1": year,
            "y0": 0,
            "y1": 1,
            "xref": "x",
            "yref": "paper",
            "line": { "color": "gray", "width": 2, "dash": "dash" },
        }],
        "xaxis": xaxis,
        "yaxis": {
            "title": {
                "text": "GDP per capita (Dollars)",
                "font": { "size": 16, "color": "blue" },
            },
            "tickfont": { "size": 12, "color": "darkblue" },
            "side": "left",
            "rangemode": "tozero",
        },
        "yaxis2": {
            "title": {
                "text": "Waste per capita (kg)",
                "font": { "size": 16, "color": "red" },
            },
            "tickfont": { "size": 12, "color": "darkred" },
            "overlaying": "y",
            "side": "right",
            "rangemode": "tozero",
        },
    });

    Figure {
        data: vec![gdp, waste],
        layout,
    }
}
