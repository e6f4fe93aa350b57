//! Browser adapters for the widget core.
//!
//! Everything here touches `window`, `fetch`, or timers. The core only sees
//! the port traits these types implement.

pub mod bridge;
pub mod host;
pub mod location;
pub mod runtime;
pub mod timeout;

use wasm_bindgen::{JsCast, JsValue};
use widget_types::WidgetError;

/// Wrap a thrown JS value, preferring the `Error.message` when there is one.
pub(crate) fn js_error(context: &str, err: JsValue) -> WidgetError {
    let detail = match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => format!("{:?}", err),
    };
    WidgetError::JsInterop(format!("{}: {}", context, detail))
}
