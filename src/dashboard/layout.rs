//! Page layout
//!
//! The component tree of the dashboard and its rendering as a single
//! self-contained HTML page. Charts are drawn client-side by Plotly.js;
//! the page script posts input changes to `/api/v1/update` and applies the
//! returned outputs by component id.

use super::callbacks::{Dashboard, InputId, OutputId};
use super::selection::Dataset;
use serde::Serialize;
use std::collections::BTreeMap;

/// One dropdown entry
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DropdownOption {
    pub label: &'static str,
    pub value: Dataset,
}

/// Dataset selector
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dropdown {
    pub id: InputId,
    pub caption: String,
    pub options: Vec<DropdownOption>,
    pub value: Dataset,
}

/// Year slider
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Slider {
    pub id: InputId,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub value: i32,
    pub marks: BTreeMap<i32, String>,
}

/// A title heading above a graph
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphSection {
    pub title_id: OutputId,
    pub title: String,
    pub graph_id: OutputId,
}

/// Component tree of the page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layout {
    pub heading: String,
    pub plotly_src: String,
    pub dropdown: Dropdown,
    pub map: GraphSection,
    pub slider: Slider,
    pub comparison: GraphSection,
}

impl Layout {
    /// Build the tree with initial values from the dashboard settings
    pub fn from_dashboard(dashboard: &Dashboard) -> Self {
        let settings = dashboard.settings();
        let initial = dashboard.initial_selection();

        let options = Dataset::all()
            .iter()
            .map(|d| DropdownOption {
                label: d.label(),
                value: *d,
            })
            .collect();

        Self {
            heading: settings.heading.clone(),
            plotly_src: settings.plotly_src.clone(),
            dropdown: Dropdown {
                id: InputId::DatasetDropdown,
                caption: "Map Dataset:".to_string(),
                options,
                value: initial.dataset,
            },
            map: GraphSection {
                title_id: OutputId::ChoroplethTitle,
                title: dashboard.map_title(initial.year, initial.dataset),
                graph_id: OutputId::Choropleth,
            },
            slider: Slider {
                id: InputId::TimeBar,
                min: settings.years.min,
                max: settings.years.max,
                step: 1,
                value: initial.year,
                marks: slider_marks(settings.years.min, settings.years.max, settings.mark_step),
            },
            comparison: GraphSection {
                title_id: OutputId::ComparisonTitle,
                title: dashboard.comparison_title(None),
                graph_id: OutputId::ComparisonLine,
            },
        }
    }
}

/// Labelled marks every `step` years starting at `min`
fn slider_marks(min: i32, max: i32, step: i32) -> BTreeMap<i32, String> {
    let step = step.max(1) as usize;
    (min..=max)
        .step_by(step)
        .map(|year| (year, year.to_string()))
        .collect()
}

/// Render the full HTML page
pub fn render_page(layout: &Layout) -> String {
    let layout_json = serde_json::to_string(layout)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{heading}</title>
    <style>{css}</style>
    <script src="{plotly_src}" charset="utf-8"></script>
</head>
<body>
    <div class="container">
        <h1 class="centered">{heading}</h1>
        {dropdown}
        {map}
        {slider}
        {comparison}
    </div>
    <script id="layout-data" type="application/json">{layout_json}</script>
    <script>{js}</script>
</body>
</html>"#,
        heading = html_escape(&layout.heading),
        plotly_src = html_escape(&layout.plotly_src),
        css = inline_css(),
        js = inline_javascript(),
        dropdown = render_dropdown(&layout.dropdown),
        map = render_graph(&layout.map),
        slider = render_slider(&layout.slider),
        comparison = render_graph(&layout.comparison),
        layout_json = layout_json,
    )
}

fn render_dropdown(dropdown: &Dropdown) -> String {
    let options: String = dropdown
        .options
        .iter()
        .map(|opt| {
            let selected = if opt.value == dropdown.value { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                html_escape(opt.value.value()),
                selected,
                html_escape(opt.label)
            )
        })
        .collect();

    format!(
        r#"<div class="row">
            <h3 class="caption">{caption}</h3>
            <select id="{id}" class="dropdown">{options}</select>
        </div>"#,
        caption = html_escape(&dropdown.caption),
        id = component_id(&dropdown.id),
        options = options,
    )
}

fn render_graph(section: &GraphSection) -> String {
    format!(
        r#"<div class="row">
            <h2 id="{title_id}" class="centered">{title}</h2>
            <div id="{graph_id}" class="graph"></div>
        </div>"#,
        title_id = component_id(&section.title_id),
        title = html_escape(&section.title),
        graph_id = component_id(&section.graph_id),
    )
}

fn render_slider(slider: &Slider) -> String {
    let span = (slider.max - slider.min).max(1) as f64;
    let marks: String = slider
        .marks
        .iter()
        .map(|(year, label)| {
            let left = (year - slider.min) as f64 / span * 100.0;
            format!(
                r#"<span class="mark" style="left: {:.2}%">{}</span>"#,
                left,
                html_escape(label)
            )
        })
        .collect();

    let id = component_id(&slider.id);
    format!(
        r#"<div class="row slider">
            <output id="{id}-tooltip" class="tooltip">{value}</output>
            <input id="{id}" type="range" min="{min}" max="{max}" step="{step}" value="{value}">
            <div class="marks">{marks}</div>
        </div>"#,
        id = id,
        min = slider.min,
        max = slider.max,
        step = slider.step,
        value = slider.value,
        marks = marks,
    )
}

/// Component id as it appears in the DOM
fn component_id<T: Serialize>(id: &T) -> String {
    serde_json::to_value(id)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body {
    margin: 0;
    background: #272b30;
    color: #c8c8c8;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
}
.container { padding: 16px 32px; }
.row { margin-bottom: 16px; }
.centered { text-align: center; }
h1, h2 { color: #fff; }
.caption {
    display: inline-block;
    width: 33%;
    text-align: right;
    color: gray;
    margin-right: 16px;
}
.dropdown {
    width: 50%;
    padding: 6px;
    font-size: 1rem;
    border-radius: 4px;
}
.graph { width: 100%; min-height: 450px; }
.slider { position: relative; padding-top: 28px; padding-bottom: 24px; }
.slider input { width: 100%; }
.tooltip {
    position: absolute;
    top: 0;
    left: 50%;
    transform: translateX(-50%);
    background: #3a3f44;
    color: #fff;
    padding: 2px 8px;
    border-radius: 4px;
}
.marks { position: relative; height: 18px; }
.mark {
    position: absolute;
    transform: translateX(-50%);
    font-size: 0.8rem;
    color: #aaa;
}
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function () {
    const layout = JSON.parse(document.getElementById('layout-data').textContent);
    const state = {
        year: layout.slider.value,
        dataset: layout.dropdown.value,
        clicked_region: null,
    };
    const slider = document.getElementById(layout.slider.id);
    const tooltip = document.getElementById(layout.slider.id + '-tooltip');
    const dropdown = document.getElementById(layout.dropdown.id);
    const applied = {};
    let counter = 0;
    let clickBound = false;

    async function update(changed) {
        const seq = ++counter;
        const body = { selection: Object.assign({}, state) };
        if (changed) body.changed = changed;
        try {
            const resp = await fetch('/api/v1/update', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify(body),
            });
            if (!resp.ok) {
                console.error('update failed', resp.status);
                return;
            }
            const payload = await resp.json();
            apply(payload.outputs, seq);
        } catch (err) {
            console.error('update failed', err);
        }
    }

    function apply(outputs, seq) {
        for (const [id, value] of Object.entries(outputs)) {
            if ((applied[id] || 0) > seq) continue;
            applied[id] = seq;
            const el = document.getElementById(id);
            if (!el) continue;
            if (typeof value === 'string') {
                el.textContent = value;
                continue;
            }
            Plotly.react(el, value.data, value.layout, { responsive: true });
            if (id === layout.map.graph_id && !clickBound) {
                el.on('plotly_click', onMapClick);
                clickBound = true;
            }
        }
    }

    function onMapClick(ev) {
        const point = ev && ev.points && ev.points[0];
        if (!point || point.hovertext == null) return;
        state.clicked_region = String(point.hovertext);
        update(['choropleth.clickData']);
    }

    slider.addEventListener('input', function () {
        state.year = Number(slider.value);
        tooltip.textContent = slider.value;
        update(['time-bar']);
    });

    dropdown.addEventListener('change', function () {
        state.dataset = dropdown.value;
        update(['dataset-dropdown']);
    });

    update(null);
})();
"#
}
