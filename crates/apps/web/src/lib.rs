//! Browser entry point for the hydrology map widget.
//!
//! The host page owns rendering (tiles, overlays, legend); this module owns
//! the widget state machine. Clicks come in through [`map_click`], identify
//! requests go out over `fetch`, and layer/view changes are read back as
//! JSON snapshots via [`layers_json`] and [`view_json`].
//!
//! All state lives in thread-locals. Wasm on the web is single-threaded, so
//! `RefCell` borrows never contend.

use std::cell::RefCell;

use console_error_panic_hook::set_once;
use foundation::geo::Coordinate;
use gloo_net::http::Request;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use identify::{IdentifyError, IdentifyResponse};
use map::{ClickEvent, ClickSubscription, LayerSource, Map};
use widget::{ClickOutcome, MapContent, Notifier, PendingIdentify, ShellConfig, VariableSink};

#[derive(Default)]
struct WidgetState {
    map: Map,
    content: MapContent,
    subscription: Option<ClickSubscription>,
}

thread_local! {
    static STATE: RefCell<WidgetState> = RefCell::new(WidgetState::default());
    static VARIABLE_CALLBACK: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the map from a shell config document (the JSON the dashboard
/// plugin serves) and attaches the content controller.
#[wasm_bindgen]
pub fn init_widget(config_json: &str) -> Result<(), JsValue> {
    let config: ShellConfig =
        serde_json::from_str(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    init_from_config(&config)
}

/// Builds the map from the stock shell config, optionally scoped to one
/// country.
#[wasm_bindgen]
pub fn init_default_widget(country: Option<String>) -> Result<(), JsValue> {
    init_from_config(&widget::default_shell_config(country.as_deref()))
}

fn init_from_config(config: &ShellConfig) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.map = widget::build_map(config);
        s.content = MapContent::new();
        let WidgetState {
            map,
            content,
            subscription,
        } = &mut *s;
        // Replacing the old subscription drops it, releasing its listener.
        *subscription = Some(
            content
                .attach(map)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
        );
        Ok(())
    })
}

/// The stock shell config as JSON, for hosts that render the container and
/// legend themselves before calling [`init_widget`].
#[wasm_bindgen]
pub fn default_config_json(country: Option<String>) -> Result<String, JsValue> {
    serde_json::to_string(&widget::default_shell_config(country.as_deref()))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Registers the host callback receiving identified variables as
/// `(key, value_json)` string pairs.
#[wasm_bindgen]
pub fn set_variable_callback(callback: js_sys::Function) {
    VARIABLE_CALLBACK.with(|cb| *cb.borrow_mut() = Some(callback));
}

#[wasm_bindgen]
pub fn set_viewport(width_px: u32, height_px: u32) {
    STATE.with(|state| {
        state
            .borrow_mut()
            .map
            .view_mut()
            .set_viewport_px(width_px, height_px);
    });
}

/// Handles a map click at Web Mercator `(x, y)`.
#[wasm_bindgen]
pub fn map_click(x: f64, y: f64) {
    let coordinate = Coordinate::new(x, y);
    let pending = STATE.with(|state| {
        let mut s = state.borrow_mut();
        let WidgetState {
            map,
            content,
            subscription,
        } = &mut *s;

        map.clicks().publish(ClickEvent { coordinate });
        let sub = subscription.as_ref()?;
        let mut pending = None;
        while let Some(event) = sub.poll() {
            if let ClickOutcome::Query(p) = content.on_click(map, event.coordinate) {
                pending = Some(p);
            }
        }
        pending
    });

    if let Some(pending) = pending {
        run_identify(pending);
    }
}

fn run_identify(pending: PendingIdentify) {
    spawn_local(async move {
        let outcome = fetch_identify(&pending.url()).await;
        STATE.with(|state| {
            let mut s = state.borrow_mut();
            let WidgetState { map, content, .. } = &mut *s;
            content.apply_identify(
                map,
                &pending,
                outcome,
                &mut HostVariableSink,
                &mut AlertNotifier,
            );
        });
        for record in STATE.with(|state| state.borrow_mut().map.log_mut().drain()) {
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "{}: {}",
                record.kind, record.message
            )));
        }
    });
}

async fn fetch_identify(url: &str) -> Result<IdentifyResponse, IdentifyError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| IdentifyError::Transport(e.to_string()))?;
    let text = resp
        .text()
        .await
        .map_err(|e| IdentifyError::Transport(e.to_string()))?;
    IdentifyResponse::parse(&text)
}

struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&mut self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

struct HostVariableSink;

impl VariableSink for HostVariableSink {
    fn update(&mut self, key: &str, value: serde_json::Value) {
        VARIABLE_CALLBACK.with(|cb| {
            if let Some(callback) = cb.borrow().as_ref() {
                let _ = callback.call2(
                    &JsValue::NULL,
                    &JsValue::from_str(key),
                    &JsValue::from_str(&value.to_string()),
                );
            }
        });
    }
}

/// One layer as the host renderer sees it, in draw order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LayerView {
    name: String,
    z_index: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    layer_defs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    feature_count: Option<usize>,
}

/// The current layer stack in draw order, as JSON.
#[wasm_bindgen]
pub fn layers_json() -> Result<String, JsValue> {
    STATE.with(|state| {
        let s = state.borrow();
        let views: Vec<LayerView> = s
            .map
            .layers_ordered()
            .into_iter()
            .map(|(_, rec)| {
                let (kind, url, opacity, layer_defs, feature_count) = match &rec.source {
                    LayerSource::RasterTile { source, opacity } => (
                        "rasterTile",
                        Some(source.url_template.clone()),
                        Some(*opacity),
                        None,
                        None,
                    ),
                    LayerSource::VectorTile { source, .. } => {
                        ("vectorTile", Some(source.url_template.clone()), None, None, None)
                    }
                    LayerSource::ImageService { source, layer_defs } => (
                        "imageService",
                        Some(source.url_template.clone()),
                        None,
                        layer_defs.clone(),
                        None,
                    ),
                    LayerSource::Overlay { features, .. } => {
                        ("overlay", None, None, None, Some(features.len()))
                    }
                };
                LayerView {
                    name: rec.name.clone(),
                    z_index: rec.z_index,
                    kind,
                    url,
                    opacity,
                    layer_defs,
                    feature_count,
                }
            })
            .collect();
        serde_json::to_string(&views).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// The camera as the host renderer sees it.
#[derive(Debug, Serialize)]
struct ViewSnapshot {
    center: [f64; 2],
    zoom: f64,
}

/// The current camera as `{"center":[x,y],"zoom":z}` JSON.
#[wasm_bindgen]
pub fn view_json() -> Result<String, JsValue> {
    STATE.with(|state| {
        let view = *state.borrow().map.view();
        let snapshot = ViewSnapshot {
            center: [view.center().x, view.center().y],
            zoom: view.zoom(),
        };
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}
