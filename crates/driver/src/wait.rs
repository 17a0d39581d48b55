//! Wait primitives.
//!
//! Every state-dependent step in a scenario is paired with an explicit wait
//! for a named UI signal, bounded by a timeout. A timeout is a failure unless
//! the call site routes it through [`best_effort`], which turns it into a
//! [`WaitOutcome`] the caller must consume: a wait can be tolerated, never
//! silently discarded.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};

use crate::error::DriverError;

/// Result of a best-effort wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The condition held within the bound.
    Ready,

    /// The bound elapsed first. The caller decided in advance this is
    /// tolerable (e.g. a spinner that may never appear on a loaded page).
    TimedOut,
}

impl WaitOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, WaitOutcome::Ready)
    }
}

/// Downgrade a timeout to [`WaitOutcome::TimedOut`]; every other error still
/// propagates. Call sites using this are the explicit whitelist of tolerated
/// waits.
pub fn best_effort(result: Result<(), DriverError>) -> Result<WaitOutcome, DriverError> {
    match result {
        Ok(()) => Ok(WaitOutcome::Ready),
        Err(err) if err.is_timeout() => Ok(WaitOutcome::TimedOut),
        Err(err) => Err(err),
    }
}

/// Poll interval used by driver implementations that have no push-based
/// condition signal.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Suspend until `probe` reports true or `bound` elapses.
///
/// Probe errors propagate immediately; the loop itself never spins faster
/// than `interval`. From the caller's perspective this is atomic
/// "suspend until true or timeout"; no polling surface leaks out.
pub async fn poll_until<F, Fut>(
    what: &str,
    bound: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<(), DriverError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, DriverError>>,
{
    let started = Instant::now();
    let outcome = timeout(bound, async {
        loop {
            if probe().await? {
                return Ok::<_, DriverError>(());
            }
            sleep(interval).await;
        }
    })
    .await;

    match outcome {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(
                what = %what,
                waited_ms = started.elapsed().as_millis() as u64,
                "wait bound elapsed"
            );
            Err(DriverError::timeout(what.to_string(), bound))
        }
    }
}
