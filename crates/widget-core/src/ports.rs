//! Port traits at the boundary between the widget core and the browser.
//!
//! These traits are defined here in `widget-core` (pure Rust).
//! Implementations live in `widget-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use serde_json::Value;
use widget_types::{event::OutboundEvent, trace::Trace, Result};

// ─── Runtime Port ────────────────────────────────────────────

/// What the conversational runtime returned for one interaction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnResponse {
    pub traces: Vec<Trace>,
    /// The runtime finished the conversation on this turn
    pub ending: bool,
}

impl TurnResponse {
    /// Build a response, treating an `end` trace as the ending signal.
    pub fn from_traces(traces: Vec<Trace>) -> Self {
        let ending = traces.iter().any(Trace::is_end);
        Self { traces, ending }
    }

    pub fn speak_messages(&self) -> impl Iterator<Item = &str> {
        self.traces.iter().filter_map(Trace::speak_message)
    }
}

#[async_trait(?Send)]
pub trait RuntimePort {
    /// Begin a fresh session and return the opening traces
    async fn start(&self) -> Result<TurnResponse>;

    /// Send one line of user text within the current session
    async fn send_text(&self, text: &str) -> Result<TurnResponse>;
}

// ─── Host Port ───────────────────────────────────────────────

/// The page embedding the widget
pub trait HostPort {
    fn emit(&self, event: OutboundEvent) -> Result<()>;
}

// ─── Message Target Port ─────────────────────────────────────

/// Identifies one installed listener on a [`MessageTarget`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Something that delivers cross-frame message data, e.g. a browser window.
pub trait MessageTarget {
    /// Install a listener that receives the `data` of every message.
    fn add_listener(&self, listener: Box<dyn FnMut(&Value)>) -> Result<ListenerId>;

    /// Remove a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}
