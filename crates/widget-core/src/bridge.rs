//! Cross-frame message bridge.
//!
//! `setup_post_message_handlers` installs exactly one listener on a
//! [`MessageTarget`], decodes each message into an [`InboundEvent`] and hands
//! it to the handler. The returned [`Subscription`] removes the listener when
//! unsubscribed or dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;
use widget_types::{event::InboundEvent, Result};

use crate::ports::{ListenerId, MessageTarget};

/// Install `handler` on `target`. Unknown events arrive as
/// [`InboundEvent::Ignored`]; the handler decides what to do with them.
pub fn setup_post_message_handlers<T, F>(target: &Rc<T>, mut handler: F) -> Result<Subscription>
where
    T: MessageTarget + ?Sized + 'static,
    F: FnMut(InboundEvent) + 'static,
{
    let id = target.add_listener(Box::new(move |data: &Value| {
        let event = InboundEvent::decode(data);
        log::debug!("Bridge received: {:?}", event);
        handler(event);
    }))?;

    let target = Rc::downgrade(target);
    Ok(Subscription::new(move || {
        if let Some(target) = target.upgrade() {
            target.remove_listener(id);
        }
    }))
}

/// Disposer for one installed listener.
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.dispose_now();
    }

    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    fn dispose_now(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose_now();
    }
}

/// Every subscription owned by a mounted widget. Disposed together, in
/// registration order, on `clear` or drop.
#[derive(Default)]
pub struct Subscriptions {
    items: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.items.push(subscription);
    }

    pub fn clear(&mut self) {
        for subscription in self.items.drain(..) {
            subscription.unsubscribe();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.clear();
    }
}

type SharedListener = Rc<RefCell<Box<dyn FnMut(&Value)>>>;

/// In-process message target. Drives the widget without a browser window.
#[derive(Default)]
pub struct LocalTarget {
    listeners: RefCell<Vec<(ListenerId, SharedListener)>>,
    next_id: Cell<u64>,
}

impl LocalTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `data` to every listener installed at the time of the call
    /// that is still installed when its turn comes.
    pub fn post(&self, data: &Value) {
        let snapshot: Vec<(ListenerId, SharedListener)> = self.listeners.borrow().clone();
        for (id, listener) in snapshot {
            if !self.is_installed(id) {
                continue;
            }
            let mut listener = listener.borrow_mut();
            (*listener)(data);
        }
    }

    fn is_installed(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(lid, _)| *lid == id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl MessageTarget for LocalTarget {
    fn add_listener(&self, listener: Box<dyn FnMut(&Value)>) -> Result<ListenerId> {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}
