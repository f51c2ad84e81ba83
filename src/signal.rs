//! Cooperative stop requests for the watch loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep while waiting for the next poll.
pub const SLEEP_SLICE: Duration = Duration::from_millis(50);

/// Polled by the loop between files and during the poll-interval sleep.
pub trait StopSignal {
    fn should_stop(&self) -> bool;
}

impl<S: StopSignal + ?Sized> StopSignal for Arc<S> {
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

/// Token for cooperative cancellation of a watch loop.
///
/// Uses an `AtomicBool` internally. Clone is cheap and shares state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl StopSignal for CancellationToken {
    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}

/// Never requests a stop; the loop ends only on a budget.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverStop;

impl StopSignal for NeverStop {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Sleep for `duration` in slices of at most [`SLEEP_SLICE`], waking early on a stop request.
///
/// A duration too large to form a deadline sleeps until `stop` fires.
/// Returns `true` if the sleep was cut short by `stop`.
pub fn sleep_interruptible<S: StopSignal + ?Sized>(duration: Duration, stop: &S) -> bool {
    let deadline = Instant::now().checked_add(duration);
    loop {
        if stop.should_stop() {
            return true;
        }
        let slice = match deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return false;
                }
                remaining.min(SLEEP_SLICE)
            }
            None => SLEEP_SLICE,
        };
        thread::sleep(slice);
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
