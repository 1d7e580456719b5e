//! Recurring carousel auto-advance timer
//!
//! Each tick locks the shared carousel and calls `next()`, so it always
//! advances from whatever index manual navigation left behind. Manual
//! navigation does not reset the interval.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use eventdeck_domain::Carousel;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Default rotation period of the featured carousel.
pub const DEFAULT_ROTATE_INTERVAL: Duration = Duration::from_millis(6000);

/// Handle to a running auto-advance task; dropping it stops the timer.
#[must_use = "dropping the handle stops the timer immediately"]
#[derive(Debug)]
pub struct AutoAdvance {
    task: JoinHandle<()>,
}

impl AutoAdvance {
    /// Starts advancing `carousel` every `period`, first firing one period
    /// from now. Must be called inside a tokio runtime.
    pub fn spawn<T: Send + 'static>(carousel: Arc<Mutex<Carousel<T>>>, period: Duration) -> Self {
        let start = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                {
                    let mut guard = carousel.lock().unwrap_or_else(PoisonError::into_inner);
                    guard.next();
                    tracing::debug!(active = ?guard.active_index(), "carousel auto-advanced");
                }
            }
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "carousel auto-advance started");
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the timer. Equivalent to dropping the handle.
    pub fn stop(self) {}
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.task.abort();
    }
}
