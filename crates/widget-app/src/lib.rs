//! Chat widget WASM entry point.
//!
//! This crate is the composition root. It reads the initial config from the
//! iframe URL, wires the browser adapters into the widget core and hands the
//! result to the egui chat window.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use widget_platform::location;

const CANVAS_ID: &str = "widget_canvas";

/// WASM entry point, run when the module is instantiated
#[wasm_bindgen(start)]
pub async fn main() -> Result<(), JsValue> {
    let level = if location::is_dev() {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("Chat widget starting...");

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str(&format!("No canvas element with id '{}'", CANVAS_ID)))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::WidgetApp::new(cc)))),
            )
            .await;
        if let Err(e) = started {
            log::error!("Failed to start eframe: {:?}", e);
        }
    });

    Ok(())
}
