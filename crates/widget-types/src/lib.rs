pub mod message;
pub mod event;
pub mod trace;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::WidgetError;
pub type Result<T> = std::result::Result<T, WidgetError>;
