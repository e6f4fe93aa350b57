//! Widget core: everything that is not rendering and not browser plumbing.

pub mod event_bus;
pub mod ports;
pub mod bridge;
pub mod conversation;
pub mod widget;
