//! Widget controller: visibility and config state plus the conversation for one mount.

use std::cell::RefCell;
use std::rc::Rc;

use widget_types::{
    config::WidgetConfig,
    event::{InboundEvent, OutboundEvent, WidgetEvent},
    Result,
};

use crate::bridge::{setup_post_message_handlers, Subscription};
use crate::conversation::Conversation;
use crate::event_bus::EventBus;
use crate::ports::{HostPort, MessageTarget, RuntimePort};

/// Plain widget state. Visibility changes only through inbound toggles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub config: WidgetConfig,
    pub is_open: bool,
}

/// A mounted widget. Clones share state.
#[derive(Clone)]
pub struct Widget {
    state: Rc<RefCell<WidgetState>>,
    conversation: Conversation,
    host: Rc<dyn HostPort>,
    bus: EventBus,
}

impl Widget {
    /// Mount with the host's initial config. The widget starts closed; call
    /// `conversation().initialize_state()` to open the runtime session.
    pub fn mount(
        config: WidgetConfig,
        runtime: Rc<dyn RuntimePort>,
        host: Rc<dyn HostPort>,
        bus: EventBus,
    ) -> Self {
        let conversation = Conversation::new(runtime, bus.clone());
        conversation.set_avatar(config.avatar.clone());

        Self {
            state: Rc::new(RefCell::new(WidgetState {
                config,
                is_open: false,
            })),
            conversation,
            host,
            bus,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> WidgetState {
        self.state.borrow().clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open
    }

    /// Listen for host messages on `target`. Drop the returned subscription
    /// to stop listening.
    pub fn subscribe<T>(&self, target: &Rc<T>) -> Result<Subscription>
    where
        T: MessageTarget + ?Sized + 'static,
    {
        let widget = self.clone();
        setup_post_message_handlers(target, move |event| widget.handle_inbound(event))
    }

    pub fn handle_inbound(&self, event: InboundEvent) {
        match event {
            InboundEvent::Toggle { is_open } => {
                self.state.borrow_mut().is_open = is_open;
                self.bus.emit(WidgetEvent::VisibilityChanged { is_open });
            }
            InboundEvent::ConfigUpdate(updates) => {
                log::debug!("Updating widget config: {:?}", updates);
                let merged = {
                    let mut state = self.state.borrow_mut();
                    state.config.merge(updates);
                    state.config.clone()
                };
                self.bus.emit(WidgetEvent::ConfigChanged(merged));
            }
            InboundEvent::Ignored { event } => {
                log::debug!("Ignoring host message: {:?}", event);
            }
        }
    }

    /// The user asked to close the window. The host decides what to do;
    /// local visibility is left alone until it sends a toggle back.
    pub fn close(&self) -> Result<()> {
        self.host.emit(OutboundEvent::Close)
    }
}
