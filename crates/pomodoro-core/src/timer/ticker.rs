//! Cancellable one-second tick source.
//!
//! Meant to be polled from the single task that owns the timer, usually as
//! one arm of a `tokio::select!`. Cancelling drops the interval in place, so
//! no tick can be observed after `cancel` returns.

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    interval: Option<Interval>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Arm the ticker. The first tick fires one full period from now.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        // A stalled loop gets one tick, not a burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Idempotent.
    pub fn cancel(&mut self) {
        self.interval = None;
    }

    /// Resolves on the next tick. Never resolves while cancelled.
    pub async fn next_tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_tick_after_one_period() {
        let mut ticker = Ticker::default();
        ticker.start();
        let started = Instant::now();
        ticker.next_tick().await;
        assert_eq!(started.elapsed(), TICK_PERIOD);
        ticker.next_tick().await;
        assert_eq!(started.elapsed(), TICK_PERIOD * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_ticker_never_fires() {
        let mut ticker = Ticker::default();
        ticker.start();
        ticker.cancel();
        assert!(!ticker.is_active());

        let fired = time::timeout(Duration::from_secs(5), ticker.next_tick()).await;
        assert!(fired.is_err());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut ticker = Ticker::default();
        ticker.cancel();
        ticker.cancel();
        assert!(!ticker.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn stall_does_not_burst() {
        let mut ticker = Ticker::default();
        ticker.start();
        time::advance(Duration::from_millis(3500)).await;

        // One overdue tick is delivered immediately...
        ticker.next_tick().await;
        let after_overdue = Instant::now();
        // ...and the next one waits a full period again.
        ticker.next_tick().await;
        assert_eq!(after_overdue.elapsed(), TICK_PERIOD);
    }
}
