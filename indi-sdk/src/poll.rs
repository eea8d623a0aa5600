//! Polling bridge from present-or-absent accessors to awaitable results
//!
//! The external client announces devices and properties asynchronously; its
//! accessors answer "known right now or not yet". [`resolve`] turns that into
//! a single awaitable: invoke the accessor, return immediately on a present
//! value, otherwise sleep one interval and retry. Announcement is monotonic
//! per name, so retries are idempotent.
//!
//! The wait suspends the calling task only; no thread is parked and no
//! task is spawned per resolution.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SdkError};

/// Retry pacing and deadline for one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollOptions {
    /// Delay between consecutive accessor calls.
    pub interval: Duration,
    /// Overall deadline. `None` retries forever; the session default keeps
    /// one so a missing device surfaces as an error instead of a hang.
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Poll `accessor` until it yields a value.
///
/// The first call happens immediately; a present value returns without any
/// suspension. The accessor runs exactly once more than the number of absent
/// results observed, and never after success, timeout, or cancellation.
///
/// Errors with [`SdkError::Timeout`] once `opts.timeout` elapses and with
/// [`SdkError::Cancelled`] when `cancel` fires, including mid-sleep.
pub async fn resolve<T, F>(
    mut accessor: F,
    opts: &PollOptions,
    cancel: &CancellationToken,
) -> Result<T>
where
    F: FnMut() -> Option<T>,
{
    let deadline = opts.timeout.map(|t| Instant::now() + t);

    loop {
        if cancel.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        if let Some(value) = accessor() {
            return Ok(value);
        }
        if let Some(deadline) = deadline {
            if Instant::now() + opts.interval >= deadline {
                // The next wake-up would land past the deadline; report the
                // timeout now rather than sleeping through it.
                return Err(SdkError::Timeout(opts.timeout.unwrap_or_default()));
            }
        }
        tokio::select! {
            _ = cancel.cancelled() => return Err(SdkError::Cancelled),
            _ = tokio::time::sleep(opts.interval) => {}
        }
    }
}
