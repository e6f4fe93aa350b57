//! Deadline for runtime requests.

use std::future::Future;

use futures::future::{self, Either};
use gloo_timers::future::TimeoutFuture;
use widget_types::{Result, WidgetError};

/// Resolve `fut`, or fail with `WidgetError::Timeout` after `ms` milliseconds.
pub async fn with_timeout<T>(ms: u32, fut: impl Future<Output = Result<T>>) -> Result<T> {
    match future::select(Box::pin(fut), TimeoutFuture::new(ms)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::warn!("Request timed out after {}ms", ms);
            Err(WidgetError::Timeout(u64::from(ms)))
        }
    }
}
