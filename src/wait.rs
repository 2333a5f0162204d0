//! Bounded waiting for external resources
//!
//! The kernel materializes the data device node some time after the creation
//! ioctl returns. Instead of a fixed sleep, callers poll a probe with
//! exponential backoff under a total budget.

use std::thread;
use std::time::{Duration, Instant};

/// Sleep intervals double from `initial` up to this cap.
const MAX_INTERVAL: Duration = Duration::from_millis(250);

/// Backoff policy for [`wait_for`].
#[derive(Debug, Clone)]
pub struct Backoff {
    /// First sleep interval.
    pub initial: Duration,
    /// Total time budget; the probe runs at least once even when zero.
    pub budget: Duration,
}

impl Backoff {
    pub fn with_budget(budget: Duration) -> Self {
        Self {
            initial: Duration::from_millis(25),
            budget,
        }
    }
}

/// Poll `probe` until it yields a value or the budget is exhausted.
pub fn wait_for<T>(mut probe: impl FnMut() -> Option<T>, policy: &Backoff) -> Option<T> {
    let deadline = Instant::now() + policy.budget;
    let mut interval = policy.initial;

    loop {
        if let Some(found) = probe() {
            return Some(found);
        }

        let now = Instant::now();
        if now >= deadline {
            return None;
        }

        thread::sleep(interval.min(deadline - now));
        interval = (interval * 2).min(MAX_INTERVAL);
    }
}
