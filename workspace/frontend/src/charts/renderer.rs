use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

use super::{build_layout, build_traces, ChartData, ChartKind, ChartRenderer};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);

    /// Diffs against the existing plot instead of rebuilding it.
    #[wasm_bindgen(js_namespace = Plotly)]
    fn react(div_id: &str, data: JsValue, layout: JsValue, config: JsValue);
}

/// Plain JS objects, not `Map`s, so Plotly can read the keys.
fn to_js(value: &Value) -> Option<JsValue> {
    match value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(js) => Some(js),
        Err(e) => {
            log::error!("Failed to convert chart payload: {:?}", e);
            None
        }
    }
}

fn plot_config() -> Value {
    json!({"responsive": true, "displayModeBar": false})
}

/// Draws into `<div id=...>` containers with the global `Plotly` object.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlotlyRenderer;

impl PlotlyRenderer {
    fn payload(kind: ChartKind, data: &ChartData) -> Option<(JsValue, JsValue, JsValue)> {
        Some((
            to_js(&build_traces(kind, data))?,
            to_js(&build_layout(kind))?,
            to_js(&plot_config())?,
        ))
    }
}

impl ChartRenderer for PlotlyRenderer {
    fn element_exists(&self, element_id: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id))
            .is_some()
    }

    fn mount(&self, element_id: &str, kind: ChartKind, data: &ChartData) {
        if let Some((traces, layout, config)) = Self::payload(kind, data) {
            new_plot(element_id, traces, layout, config);
        }
    }

    fn redraw(&self, element_id: &str, kind: ChartKind, data: &ChartData) {
        log::trace!("Redrawing '{}' with {} labels", element_id, data.labels.len());
        if let Some((traces, layout, config)) = Self::payload(kind, data) {
            react(element_id, traces, layout, config);
        }
    }
}
