//! Conversation lifecycle: start, send, restart on ending.
//!
//! State lives behind `Rc<RefCell<_>>` so the UI can hold a clone while a
//! call is awaiting the runtime. No borrow is held across an await point.
//! Session starts and sends share one `SendingGuard`: at most one runtime
//! round trip is in flight, and the guard is released however it finishes.

use std::cell::RefCell;
use std::rc::Rc;

use widget_types::{
    event::WidgetEvent,
    message::Message,
    Result, WidgetError,
};

use crate::event_bus::EventBus;
use crate::ports::{RuntimePort, TurnResponse};

/// Result of a `send_text` call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The text reached the runtime. `restarted` is set when the runtime
    /// ended the conversation and a fresh session was started.
    Delivered { restarted: bool },
    /// Another send is still in flight
    Busy,
    /// Empty or whitespace-only text
    Blank,
}

/// Result of an `initialize_state` call that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A start or send is still in flight
    Busy,
}

#[derive(Default)]
struct ConversationState {
    messages: Vec<Message>,
    is_sending: bool,
    avatar: Option<String>,
}

/// Handle to the transcript and the runtime session. Clones share state.
#[derive(Clone)]
pub struct Conversation {
    state: Rc<RefCell<ConversationState>>,
    runtime: Rc<dyn RuntimePort>,
    bus: EventBus,
}

impl Conversation {
    pub fn new(runtime: Rc<dyn RuntimePort>, bus: EventBus) -> Self {
        Self {
            state: Rc::new(RefCell::new(ConversationState::default())),
            runtime,
            bus,
        }
    }

    /// Photo shown next to bot messages appended from now on.
    pub fn set_avatar(&self, avatar: Option<String>) {
        self.state.borrow_mut().avatar = avatar;
    }

    pub fn messages(&self) -> Vec<Message> {
        self.state.borrow().messages.clone()
    }

    pub fn is_sending(&self) -> bool {
        self.state.borrow().is_sending
    }

    /// Start a new runtime session and append its opening bot messages.
    /// Rejected while another start or send holds the guard.
    pub async fn initialize_state(&self) -> Result<StartOutcome> {
        let Some(_guard) = SendingGuard::acquire(self) else {
            log::debug!("Start rejected: a runtime call is in flight");
            return Ok(StartOutcome::Busy);
        };
        self.start_session().await?;
        Ok(StartOutcome::Started)
    }

    /// Caller holds the guard.
    async fn start_session(&self) -> Result<()> {
        let response = self.runtime.start().await.map_err(|e| self.report(e))?;
        self.append_bot_messages(&response);
        log::info!("Conversation started");
        Ok(())
    }

    /// Send one line of user text.
    ///
    /// The customer message is appended before the runtime is called. When
    /// the runtime ends the conversation, a fresh session is started right
    /// away so its greeting lands after the ending turn's messages.
    pub async fn send_text(&self, text: &str) -> Result<SendOutcome> {
        if text.trim().is_empty() {
            return Ok(SendOutcome::Blank);
        }
        let Some(_guard) = SendingGuard::acquire(self) else {
            log::debug!("Send rejected: another send is in flight");
            return Ok(SendOutcome::Busy);
        };

        self.append(Message::customer(text));

        let response = self
            .runtime
            .send_text(text)
            .await
            .map_err(|e| self.report(e))?;
        self.append_bot_messages(&response);

        if response.ending {
            log::info!("Runtime ended the conversation, restarting");
            self.bus.emit(WidgetEvent::SessionRestarted);
            self.start_session().await?;
        }

        Ok(SendOutcome::Delivered {
            restarted: response.ending,
        })
    }

    fn append_bot_messages(&self, response: &TurnResponse) {
        let avatar = self.state.borrow().avatar.clone();
        for body in response.speak_messages() {
            self.append(Message::bot(body, avatar.clone()));
        }
    }

    fn append(&self, message: Message) {
        self.state.borrow_mut().messages.push(message.clone());
        self.bus.emit(WidgetEvent::MessageAppended(message));
    }

    fn report(&self, err: WidgetError) -> WidgetError {
        log::warn!("Runtime call failed: {}", err);
        self.bus.emit(WidgetEvent::Error {
            message: err.to_string(),
        });
        err
    }
}

/// Holds the in-flight flag for the duration of one start or send.
struct SendingGuard {
    conversation: Conversation,
}

impl SendingGuard {
    fn acquire(conversation: &Conversation) -> Option<Self> {
        {
            let mut state = conversation.state.borrow_mut();
            if state.is_sending {
                return None;
            }
            state.is_sending = true;
        }
        conversation
            .bus
            .emit(WidgetEvent::SendingChanged { is_sending: true });
        Some(Self {
            conversation: conversation.clone(),
        })
    }
}

impl Drop for SendingGuard {
    fn drop(&mut self) {
        self.conversation.state.borrow_mut().is_sending = false;
        self.conversation
            .bus
            .emit(WidgetEvent::SendingChanged { is_sending: false });
    }
}
