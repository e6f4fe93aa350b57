//! `message` event listener on a browser event target (normally `window`).
//!
//! Each installed listener owns its wasm-bindgen `Closure`. Removing the
//! listener detaches it from the target and drops the closure.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use gloo_utils::format::JsValueSerdeExt;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, MessageEvent};

use widget_core::ports::{ListenerId, MessageTarget};
use widget_types::{Result, WidgetError};

use crate::js_error;

const MESSAGE_EVENT: &str = "message";

pub struct WindowTarget {
    target: EventTarget,
    listeners: RefCell<HashMap<ListenerId, Closure<dyn FnMut(MessageEvent)>>>,
    next_id: Cell<u64>,
}

impl WindowTarget {
    pub fn new(target: EventTarget) -> Self {
        Self {
            target,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    /// Listen on the current global `window`.
    pub fn window() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WidgetError::JsInterop("No window object".to_string()))?;
        Ok(Self::new(window.into()))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn detach(&self, closure: &Closure<dyn FnMut(MessageEvent)>) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(MESSAGE_EVENT, closure.as_ref().unchecked_ref())
        {
            log::warn!("removeEventListener failed: {:?}", e);
        }
    }
}

impl MessageTarget for WindowTarget {
    fn add_listener(&self, mut listener: Box<dyn FnMut(&Value)>) -> Result<ListenerId> {
        let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
            // Data that is not JSON-shaped (e.g. a transferable) decodes as null
            let data = event.data().into_serde::<Value>().unwrap_or(Value::Null);
            listener(&data);
        }) as Box<dyn FnMut(MessageEvent)>);

        self.target
            .add_event_listener_with_callback(MESSAGE_EVENT, closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener", e))?;

        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, closure);
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id);
        if let Some(closure) = removed {
            self.detach(&closure);
        }
    }
}

impl Drop for WindowTarget {
    fn drop(&mut self) {
        for (_, closure) in self.listeners.borrow_mut().drain() {
            self.detach(&closure);
        }
    }
}
