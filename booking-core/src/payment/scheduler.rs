//! Fixed-interval timer driving status checks.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Ticks once per poll interval, starting one interval after creation.
///
/// Owned by the session driver. Dropping it releases the timer; there are
/// no callbacks to outlive it. A tick that comes due while a status check is
/// still in flight is delayed rather than bunched up, so at most one check
/// runs at a time.
pub(crate) struct PollScheduler {
    interval: Interval,
}

impl PollScheduler {
    /// Start ticking. The first tick is one `period` from now.
    pub(crate) fn start(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    /// Wait for the next tick.
    pub(crate) async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
