use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 5;

/// Fixed-rate tick scheduler.
///
/// Accumulates elapsed wall time and yields whole ticks of `interval`. The
/// event loop feeds it elapsed time, runs the returned number of ticks, and
/// sleeps until `time_until_next`.
#[derive(Debug, Clone)]
pub struct FixedTicker {
    interval: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
}

impl FixedTicker {
    pub fn new(interval: Duration, max_ticks_per_frame: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_micros(1)),
            accumulator: Duration::ZERO,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add elapsed time and return how many ticks are now due.
    ///
    /// After a stall longer than `max_ticks_per_frame` intervals the backlog
    /// is dropped rather than replayed, keeping only the partial interval.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let due = self.accumulator.as_nanos() / self.interval.as_nanos();
        let ticks = due.min(self.max_ticks_per_frame as u128) as u32;

        if due > ticks as u128 {
            warn!(due = due as u64, ran = ticks, "tick backlog dropped");
            let remainder = self.accumulator.as_nanos() % self.interval.as_nanos();
            self.accumulator = Duration::from_nanos(remainder as u64);
        } else {
            self.accumulator -= self.interval * ticks;
        }
        ticks
    }

    pub fn time_until_next(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }
}
