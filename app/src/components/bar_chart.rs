//! Bar Chart Component
//!
//! Grouped bar chart of evaluation results per county, one bar per model
//! category. Uses ECharts for visualization via wasm-bindgen JS interop.

use dioxus::prelude::*;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local as spawn;

use evalboard_core::chart::bar_chart_option;

use crate::api::DashboardHandle;

const CHART_ID: &str = "chart-evaluation";

// ─────────────────────────────────────────────────────────────────────────────
// ECharts JS Interop
// ─────────────────────────────────────────────────────────────────────────────

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = echarts, js_name = init)]
    fn echarts_init(dom: &web_sys::Element) -> JsValue;

    #[wasm_bindgen(js_namespace = echarts, js_name = getInstanceByDom)]
    fn echarts_get_instance(dom: &web_sys::Element) -> JsValue;
}

fn chart_element(element_id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(element_id)
}

/// Existing chart instance on the element, if one was created
fn existing_chart(element_id: &str) -> Option<JsValue> {
    let element = chart_element(element_id)?;
    let instance = echarts_get_instance(&element);
    (!instance.is_null() && !instance.is_undefined()).then_some(instance)
}

fn init_chart(element_id: &str) -> Option<JsValue> {
    if let Some(existing) = existing_chart(element_id) {
        return Some(existing);
    }
    let element = chart_element(element_id)?;
    Some(echarts_init(&element))
}

fn chart_method(chart: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(chart, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
}

/// Replace the chart option entirely so series from earlier data don't linger
fn set_chart_option(chart: &JsValue, option: &JsValue) {
    if let Some(func) = chart_method(chart, "setOption") {
        let _ = func.call2(chart, option, &JsValue::TRUE);
    }
}

fn resize_chart(chart: &JsValue) {
    if let Some(func) = chart_method(chart, "resize") {
        let _ = func.call0(chart);
    }
}

fn dispose_chart(element_id: &str) {
    if let Some(instance) = existing_chart(element_id)
        && let Some(func) = chart_method(&instance, "dispose")
    {
        let _ = func.call0(&instance);
    }
}

fn to_js_option(option: &serde_json::Value) -> JsValue {
    // Plain JS objects rather than Maps, which is what ECharts reads
    option
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ─────────────────────────────────────────────────────────────────────────────
// Component
// ─────────────────────────────────────────────────────────────────────────────

#[component]
pub fn BarChart() -> Element {
    let dashboard = use_context::<DashboardHandle>();
    let session = dashboard.session;

    // Re-render whenever rows, categories or colors change
    use_effect(move || {
        let option = {
            let s = session.read();
            bar_chart_option(s.rows(), s.categories(), s.colors())
        };

        spawn(async move {
            // Small delay to ensure DOM is ready
            gloo_timers::future::TimeoutFuture::new(50).await;

            if let Some(chart) = init_chart(CHART_ID) {
                set_chart_option(&chart, &to_js_option(&option));
                resize_chart(&chart);
            }
        });
    });

    // Window resize listener
    use_effect(|| {
        let closure = Closure::wrap(Box::new(move || {
            if let Some(chart) = existing_chart(CHART_ID) {
                resize_chart(&chart);
            }
        }) as Box<dyn Fn()>);

        if let Some(window) = web_sys::window() {
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }

        closure.forget();
    });

    use_drop(move || {
        dispose_chart(CHART_ID);
    });

    rsx! {
        div { id: CHART_ID, class: "chart-container" }
    }
}
