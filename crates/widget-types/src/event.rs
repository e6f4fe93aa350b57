use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::config::{is_truthy, WidgetConfig};
use crate::message::Message;

pub const TOGGLE_EVENT: &str = "papercups:toggle";
pub const CONFIG_UPDATE_EVENT: &str = "config:update";
pub const CLOSE_EVENT: &str = "papercups:close";

/// A cross-frame message received from the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// `papercups:toggle`: show or hide the chat window
    Toggle { is_open: bool },
    /// `config:update`, already reduced to the updatable keys
    ConfigUpdate(WidgetConfig),
    /// Anything else, including data with no `event` key
    Ignored { event: Option<String> },
}

impl InboundEvent {
    /// Decode the `data` of a message event: `{ event, payload }`.
    /// A missing or null payload is treated as an empty mapping.
    pub fn decode(data: &Value) -> Self {
        let Some(obj) = data.as_object() else {
            return InboundEvent::Ignored { event: None };
        };

        let event = obj.get("event").and_then(Value::as_str);
        let payload = match obj.get("payload") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(p) => p.clone(),
        };

        match event {
            Some(TOGGLE_EVENT) => InboundEvent::Toggle {
                is_open: is_truthy(payload.get("isOpen")),
            },
            Some(CONFIG_UPDATE_EVENT) => {
                InboundEvent::ConfigUpdate(WidgetConfig::sanitize(&payload))
            }
            other => InboundEvent::Ignored {
                event: other.map(String::from),
            },
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, InboundEvent::Ignored { .. })
    }
}

/// A cross-frame message sent to the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundEvent {
    /// `papercups:close`: ask the host to hide the widget
    Close,
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::Close => CLOSE_EVENT,
        }
    }

    pub fn to_value(&self) -> Value {
        json!({ "event": self.name(), "payload": {} })
    }
}

/// Events published by the widget core.
/// The UI drains these each frame for reactive updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// A message was added to the transcript
    MessageAppended(Message),

    /// The send guard was taken or released
    SendingChanged { is_sending: bool },

    /// The host toggled the chat window
    VisibilityChanged { is_open: bool },

    /// The merged config after an update
    ConfigChanged(WidgetConfig),

    /// The runtime ended the conversation and a fresh session is starting
    SessionRestarted,

    /// A runtime call failed
    Error { message: String },
}
