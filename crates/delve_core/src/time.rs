//! Simulation clock
//!
//! Counts completed ticks and the simulated time they represent. Ticks are
//! discrete steps; the duration is only used for reporting and for hosts that
//! pace their loop in real time.

use std::time::Duration;

/// Default simulation tick rate (60 Hz = 16.666ms per tick)
pub const DEFAULT_TICK_RATE_HZ: u32 = 60;

/// Simulation time tracker
#[derive(Debug, Clone)]
pub struct SimulationTime {
    tick_count: u64,
    tick_duration: Duration,
    accumulated_time: Duration,
}

impl SimulationTime {
    pub fn new() -> Self {
        Self::with_tick_rate(DEFAULT_TICK_RATE_HZ)
    }

    /// Clock advancing `hz` ticks per simulated second. `0` is treated as `1`.
    pub fn with_tick_rate(hz: u32) -> Self {
        Self::with_tick_duration(Duration::from_secs(1) / hz.max(1))
    }

    pub fn with_tick_duration(tick_duration: Duration) -> Self {
        Self {
            tick_count: 0,
            tick_duration,
            accumulated_time: Duration::ZERO,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn advance_tick(&mut self) {
        self.tick_count += 1;
        self.accumulated_time += self.tick_duration;
    }

    pub fn total_time(&self) -> Duration {
        self.accumulated_time
    }
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self::new()
    }
}
