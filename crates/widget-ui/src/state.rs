//! UI-level state that drives rendering.
//! This is a read-only projection of the widget core, updated each frame
//! by draining the EventBus.

use widget_types::{
    config::{ResolvedConfig, WidgetConfig},
    event::WidgetEvent,
    message::Message,
};

/// State visible to the chat window
pub struct UiState {
    /// Transcript in display order
    pub messages: Vec<Message>,
    pub config: WidgetConfig,
    pub is_open: bool,
    pub is_sending: bool,
    /// Input field content
    pub input_text: String,
    /// Inline notice for the last failed runtime call
    pub error_notice: Option<String>,
    /// Focus the input on the next frame
    pub focus_input: bool,
}

impl UiState {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            messages: Vec::new(),
            config,
            is_open: false,
            is_sending: false,
            input_text: String::new(),
            error_notice: None,
            focus_input: false,
        }
    }

    /// Process events from the EventBus and update UI state
    pub fn process_events(&mut self, events: Vec<WidgetEvent>) {
        for event in events {
            match event {
                WidgetEvent::MessageAppended(message) => {
                    self.messages.push(message);
                }
                WidgetEvent::SendingChanged { is_sending } => {
                    self.is_sending = is_sending;
                    if is_sending {
                        self.error_notice = None;
                    }
                }
                WidgetEvent::VisibilityChanged { is_open } => {
                    self.is_open = is_open;
                    if is_open {
                        self.focus_input = true;
                    }
                }
                WidgetEvent::ConfigChanged(config) => {
                    self.config = config;
                }
                WidgetEvent::SessionRestarted => {
                    log::debug!("Session restarted");
                }
                WidgetEvent::Error { message } => {
                    self.error_notice = Some(message);
                }
            }
        }
    }

    /// Nothing is drawn until the host has supplied at least one option.
    pub fn should_render(&self) -> bool {
        !self.config.is_empty()
    }

    pub fn resolved_config(&self) -> ResolvedConfig {
        self.config.resolve()
    }

    pub fn can_send(&self) -> bool {
        !self.is_sending && !self.input_text.trim().is_empty()
    }

    /// Take the input text for sending, clearing the field.
    pub fn take_submission(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        Some(std::mem::take(&mut self.input_text))
    }

    /// Timestamps are only shown under the newest message.
    pub fn shows_timestamp(&self, index: usize) -> bool {
        index + 1 == self.messages.len()
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(WidgetConfig::default())
    }
}
