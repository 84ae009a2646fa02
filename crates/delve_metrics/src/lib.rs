//! Delve Metrics - per-system and per-tick timing
//!
//! Provides zero-cost abstractions for metrics collection that completely
//! vanish in production builds via feature flags.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use delve_metrics::{SystemProfiler, TickBudget};
//!
//! let mut budget = TickBudget::new(world.time().tick_duration());
//! let mut profiler = SystemProfiler::new();
//! budget.begin();
//! profiler.time_system("move_player", || move_player(&mut commands));
//! budget.end();
//! println!("{} overruns, load {:.2}", budget.overruns(), budget.load());
//! ```
//!
//! Without the `metrics` feature every type below is an empty stub with the
//! same API, so call sites never need their own `cfg`.

use std::time::Duration;

#[cfg(feature = "metrics")]
mod system_profiler;
#[cfg(feature = "metrics")]
mod tick_budget;

#[cfg(feature = "metrics")]
pub use system_profiler::SystemProfiler;
#[cfg(feature = "metrics")]
pub use tick_budget::TickBudget;

/// Accumulated cost of one named system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemTiming {
    pub total: Duration,
    pub calls: u64,
}

impl SystemTiming {
    /// Mean time per call; zero before the first call.
    pub fn average(&self) -> Duration {
        if self.calls == 0 {
            Duration::ZERO
        } else {
            self.total.div_f64(self.calls as f64)
        }
    }
}

/// Whether this build records anything.
pub const ENABLED: bool = cfg!(feature = "metrics");

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct TickBudget;

#[cfg(not(feature = "metrics"))]
impl TickBudget {
    pub fn new(_budget: Duration) -> Self { Self }
    pub fn budget(&self) -> Duration { Duration::ZERO }
    pub fn begin(&mut self) {}
    pub fn end(&mut self) -> Duration { Duration::ZERO }
    pub fn record(&mut self, _cost: Duration) {}
    pub fn ticks(&self) -> u64 { 0 }
    pub fn overruns(&self) -> u64 { 0 }
    pub fn worst(&self) -> Duration { Duration::ZERO }
    pub fn average(&self) -> Duration { Duration::ZERO }
    pub fn load(&self) -> f64 { 0.0 }
}

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Default)]
pub struct SystemProfiler;

#[cfg(not(feature = "metrics"))]
impl SystemProfiler {
    pub fn new() -> Self { Self }
    #[inline(always)]
    pub fn time_system<F, R>(&mut self, _name: &str, f: F) -> R where F: FnOnce() -> R { f() }
    pub fn timing(&self, _name: &str) -> SystemTiming { SystemTiming::default() }
    pub fn reset(&mut self) {}
    pub fn iter(&self) -> std::iter::Empty<(&str, SystemTiming)> { std::iter::empty() }
}
