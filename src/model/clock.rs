use std::time::Duration;

pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

/// Session-wide simulation clock.
///
/// `paused` is written only by the pause coordinator; everything else gets a
/// shared reference and reads it before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    tick_rate_hz: u32,
    paused: bool,
}

impl SimulationClock {
    /// A zero rate falls back to the default 60 Hz
    pub fn new(tick_rate_hz: u32) -> Self {
        let tick_rate_hz = if tick_rate_hz == 0 { DEFAULT_TICK_RATE_HZ } else { tick_rate_hz };
        Self { tick_rate_hz, paused: false }
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.tick_rate_hz
    }

    /// Interval between fixed ticks (16.67 ms at 60 Hz)
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz as f64)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_HZ)
    }
}
