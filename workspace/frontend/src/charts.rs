//! Thin adapter over the browser charting library.
//!
//! A [`ChartHandle`] binds to a container element once and is then updated in
//! place: `update` swaps labels and series and asks the renderer to redraw the
//! existing plot. The plot is never re-created, so hover state and animation
//! survive a refresh.

pub mod renderer;

use plotly::common::{Fill, Line, LineShape, Mode};
use plotly::Scatter;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

pub use self::renderer::PlotlyRenderer;

const YOU_COLOR: &str = "rgba(54,162,235,1)";
const AVERAGE_COLOR: &str = "rgba(255,99,132,1)";
const DOUGHNUT_COLORS: [&str; 6] = ["#42a5f5", "#ef5350", "#9575cd", "#ffcc80", "#81c784", "#6ab7ff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Doughnut,
    Radar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
}

impl Dataset {
    pub fn empty(label: &str) -> Self {
        Self { label: label.to_string(), values: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Drawing backend. Implemented by [`PlotlyRenderer`] in the browser.
pub trait ChartRenderer {
    fn element_exists(&self, element_id: &str) -> bool;
    /// First draw into an empty element.
    fn mount(&self, element_id: &str, kind: ChartKind, data: &ChartData);
    /// Redraw an already mounted plot with new data.
    fn redraw(&self, element_id: &str, kind: ChartKind, data: &ChartData);
}

pub struct ChartHandle {
    element_id: String,
    kind: ChartKind,
    data: RefCell<ChartData>,
    renderer: Rc<dyn ChartRenderer>,
}

impl std::fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartHandle")
            .field("element_id", &self.element_id)
            .field("kind", &self.kind)
            .field("data", &self.data.borrow())
            .finish()
    }
}

impl ChartHandle {
    fn create(
        element_id: &str,
        kind: ChartKind,
        data: ChartData,
        renderer: Rc<dyn ChartRenderer>,
    ) -> Option<Self> {
        if !renderer.element_exists(element_id) {
            log::debug!("Chart container '{}' not found, skipping {:?} chart", element_id, kind);
            return None;
        }
        renderer.mount(element_id, kind, &data);
        log::trace!("Mounted {:?} chart into '{}'", kind, element_id);
        Some(Self {
            element_id: element_id.to_string(),
            kind,
            data: RefCell::new(data),
            renderer,
        })
    }

    /// "You" vs "Average" over ordered labels.
    pub fn create_line_chart(element_id: &str, renderer: Rc<dyn ChartRenderer>) -> Option<Self> {
        let data = ChartData {
            labels: Vec::new(),
            datasets: vec![Dataset::empty("You"), Dataset::empty("Average")],
        };
        Self::create(element_id, ChartKind::Line, data, renderer)
    }

    /// Single-series doughnut; `labels` name the slices and start at zero.
    pub fn create_doughnut_chart(
        element_id: &str,
        labels: &[&str],
        renderer: Rc<dyn ChartRenderer>,
    ) -> Option<Self> {
        let data = ChartData {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            datasets: vec![Dataset {
                label: String::new(),
                values: vec![0.0; labels.len()],
            }],
        };
        Self::create(element_id, ChartKind::Doughnut, data, renderer)
    }

    /// "You" vs "Average" on a 0..5 radial axis.
    pub fn create_radar_chart(element_id: &str, renderer: Rc<dyn ChartRenderer>) -> Option<Self> {
        let data = ChartData {
            labels: Vec::new(),
            datasets: vec![Dataset::empty("You"), Dataset::empty("Average")],
        };
        Self::create(element_id, ChartKind::Radar, data, renderer)
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn data(&self) -> ChartData {
        self.data.borrow().clone()
    }

    /// Replaces labels and the values of each dataset, in order, then redraws.
    pub fn update(&self, labels: Vec<String>, series: Vec<Vec<f64>>) {
        {
            let mut data = self.data.borrow_mut();
            data.labels = labels;
            Self::replace_series(&self.element_id, &mut data, series);
        }
        self.redraw();
    }

    /// Same as [`update`](Self::update) but keeps the current labels.
    pub fn update_series(&self, series: Vec<Vec<f64>>) {
        {
            let mut data = self.data.borrow_mut();
            Self::replace_series(&self.element_id, &mut data, series);
        }
        self.redraw();
    }

    fn replace_series(element_id: &str, data: &mut ChartData, series: Vec<Vec<f64>>) {
        if series.len() != data.datasets.len() {
            log::warn!(
                "Chart '{}' has {} datasets but got {} series",
                element_id,
                data.datasets.len(),
                series.len()
            );
        }
        for (dataset, values) in data.datasets.iter_mut().zip(series) {
            dataset.values = values;
        }
    }

    fn redraw(&self) {
        let data = self.data.borrow();
        self.renderer.redraw(&self.element_id, self.kind, &data);
    }
}

/// Plotly trace array for `data`.
pub fn build_traces(kind: ChartKind, data: &ChartData) -> Value {
    match kind {
        ChartKind::Line => {
            let traces: Vec<Value> = data
                .datasets
                .iter()
                .zip([YOU_COLOR, AVERAGE_COLOR].iter().cycle())
                .map(|(dataset, color)| {
                    let trace = Scatter::new(data.labels.clone(), dataset.values.clone())
                        .mode(Mode::Lines)
                        .name(&dataset.label)
                        .fill(Fill::ToZeroY)
                        .line(Line::new().shape(LineShape::Spline).color(*color));
                    serde_json::to_value(&trace).unwrap_or(Value::Null)
                })
                .collect();
            Value::Array(traces)
        }
        ChartKind::Doughnut => {
            let values = data.datasets.first().map(|d| d.values.clone()).unwrap_or_default();
            let colors: Vec<&str> = DOUGHNUT_COLORS.iter().cycle().take(data.labels.len()).copied().collect();
            json!([{
                "type": "pie",
                "hole": 0.5,
                "labels": data.labels,
                "values": values,
                "marker": {"colors": colors},
                "sort": false
            }])
        }
        ChartKind::Radar => {
            let traces: Vec<Value> = data
                .datasets
                .iter()
                .zip([YOU_COLOR, AVERAGE_COLOR].iter().cycle())
                .map(|(dataset, color)| {
                    json!({
                        "type": "scatterpolar",
                        "r": dataset.values,
                        "theta": data.labels,
                        "name": dataset.label,
                        "line": {"color": color}
                    })
                })
                .collect();
            Value::Array(traces)
        }
    }
}

/// Plotly layout for a chart kind.
pub fn build_layout(kind: ChartKind) -> Value {
    let base = json!({
        "margin": {"t": 10, "r": 10, "l": 40, "b": 30},
        "paper_bgcolor": "rgba(0,0,0,0)",
        "plot_bgcolor": "rgba(0,0,0,0)",
    });
    let extra = match kind {
        ChartKind::Line => json!({
            "yaxis": {"rangemode": "tozero", "gridcolor": "#eee"},
            "xaxis": {"showgrid": false},
            "legend": {"orientation": "h", "y": 1.1}
        }),
        ChartKind::Doughnut => json!({
            "legend": {"orientation": "h", "y": -0.1}
        }),
        ChartKind::Radar => json!({
            "polar": {"radialaxis": {"range": [0.0, common::MAX_DIFFICULTY], "visible": true}},
            "legend": {"orientation": "h", "y": 1.1}
        }),
    };
    merge(base, extra)
}

fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(target), Value::Object(extra)) = (base.as_object_mut(), extra) {
        target.extend(extra);
    }
    base
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    pub enum RenderCall {
        Mount(String, ChartKind),
        Redraw(String, ChartKind, ChartData),
    }

    /// Renderer that records calls; only the listed element ids exist.
    #[derive(Default)]
    pub struct RecordingRenderer {
        existing: HashSet<String>,
        pub calls: RefCell<Vec<RenderCall>>,
    }

    impl RecordingRenderer {
        pub fn with_elements(ids: &[&str]) -> Rc<Self> {
            Rc::new(Self {
                existing: ids.iter().map(|id| id.to_string()).collect(),
                calls: RefCell::new(Vec::new()),
            })
        }

        pub fn mounts(&self) -> usize {
            self.calls.borrow().iter().filter(|c| matches!(c, RenderCall::Mount(..))).count()
        }

        pub fn redraws(&self) -> usize {
            self.calls.borrow().iter().filter(|c| matches!(c, RenderCall::Redraw(..))).count()
        }
    }

    impl ChartRenderer for RecordingRenderer {
        fn element_exists(&self, element_id: &str) -> bool {
            self.existing.contains(element_id)
        }

        fn mount(&self, element_id: &str, kind: ChartKind, _data: &ChartData) {
            self.calls.borrow_mut().push(RenderCall::Mount(element_id.to_string(), kind));
        }

        fn redraw(&self, element_id: &str, kind: ChartKind, data: &ChartData) {
            self.calls
                .borrow_mut()
                .push(RenderCall::Redraw(element_id.to_string(), kind, data.clone()));
        }
    }
}
