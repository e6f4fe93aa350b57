//! Outbound messages to the page that embeds the widget iframe.

use gloo_utils::format::JsValueSerdeExt;
use wasm_bindgen::JsValue;

use widget_core::ports::HostPort;
use widget_types::{event::OutboundEvent, Result, WidgetError};

use crate::js_error;

/// Posts events to `window.parent`.
pub struct ParentFrameHost {
    target_origin: String,
}

impl ParentFrameHost {
    pub fn new() -> Self {
        Self {
            target_origin: "*".to_string(),
        }
    }

    /// Restrict delivery to one host origin instead of `*`.
    pub fn with_target_origin(origin: impl Into<String>) -> Self {
        Self {
            target_origin: origin.into(),
        }
    }

    pub fn target_origin(&self) -> &str {
        &self.target_origin
    }
}

impl Default for ParentFrameHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPort for ParentFrameHost {
    fn emit(&self, event: OutboundEvent) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| WidgetError::JsInterop("No window object".to_string()))?;
        let parent = window
            .parent()
            .map_err(|e| js_error("window.parent", e))?
            .ok_or_else(|| WidgetError::JsInterop("No parent window".to_string()))?;

        let data = JsValue::from_serde(&event.to_value())?;
        log::debug!("Emitting {} to host", event.name());
        parent
            .post_message(&data, &self.target_origin)
            .map_err(|e| js_error("postMessage", e))
    }
}
