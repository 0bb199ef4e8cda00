//! Timer-driven re-read of derived views
//!
//! This is a polling convenience for displays; queue correctness never
//! depends on it.

use std::time::Duration;
use tokio::time::interval;

/// Shortest period accepted; `tokio::time::interval` panics on zero
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

pub struct Refresher {
    period: Duration,
}

impl Refresher {
    /// Periods below [`MIN_PERIOD`] are raised to it
    pub fn new(period: Duration) -> Self {
        if period < MIN_PERIOD {
            tracing::warn!("Refresh period {:?} too short, using {:?}", period, MIN_PERIOD);
        }
        Self {
            period: period.max(MIN_PERIOD),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Call `on_tick` immediately and then once per period. Stops after
    /// `max_ticks` calls when given, otherwise runs until the task is dropped.
    /// A failing tick is logged and the loop carries on.
    pub async fn run<F>(&self, max_ticks: Option<usize>, mut on_tick: F) -> usize
    where
        F: FnMut() -> anyhow::Result<()>,
    {
        let mut timer = interval(self.period);
        let mut ticks = 0;
        loop {
            if max_ticks.is_some_and(|max| ticks >= max) {
                return ticks;
            }
            timer.tick().await;
            ticks += 1;

            if let Err(e) = on_tick() {
                tracing::error!("Error refreshing view: {}", e);
            } else {
                tracing::debug!("Refreshed view (tick {})", ticks);
            }
        }
    }
}
