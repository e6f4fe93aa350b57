//! Queue of `WidgetEvent`s between the widget core and the UI.
//!
//! Single-threaded. The core pushes from callbacks and spawned tasks; the UI
//! drains once per frame. An optional wake hook runs after every push so a
//! renderer that only paints on demand learns there is something new.

use std::cell::RefCell;
use std::rc::Rc;
use widget_types::event::WidgetEvent;

#[derive(Default)]
struct Shared {
    queue: RefCell<Vec<WidgetEvent>>,
    wake: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Shared event bus. Clones share the queue.
#[derive(Clone, Default)]
pub struct EventBus {
    shared: Rc<Shared>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `wake` after each emitted event. Replaces any earlier hook.
    pub fn on_emit(&self, wake: impl Fn() + 'static) {
        *self.shared.wake.borrow_mut() = Some(Rc::new(wake));
    }

    pub fn emit(&self, event: WidgetEvent) {
        self.shared.queue.borrow_mut().push(event);
        // Cloned out so the hook may emit or drain
        let wake = self.shared.wake.borrow().clone();
        if let Some(wake) = wake {
            wake();
        }
    }

    /// Take every pending event in emission order.
    pub fn drain(&self) -> Vec<WidgetEvent> {
        std::mem::take(&mut *self.shared.queue.borrow_mut())
    }

    pub fn has_pending(&self) -> bool {
        !self.shared.queue.borrow().is_empty()
    }
}
