//! Accumulated timings per named system

use crate::SystemTiming;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Debug, Default)]
pub struct SystemProfiler {
    timings: HashMap<String, SystemTiming>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f`, charging its wall time to `name`.
    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        let timing = self.timings.entry(name.to_string()).or_default();
        timing.total += elapsed;
        timing.calls += 1;
        result
    }

    pub fn timing(&self, name: &str) -> SystemTiming {
        self.timings.get(name).copied().unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SystemTiming)> {
        self.timings.iter().map(|(name, timing)| (name.as_str(), *timing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_calls_per_name() {
        let mut profiler = SystemProfiler::new();
        profiler.time_system("a", || ());
        profiler.time_system("a", || ());
        profiler.time_system("b", || ());

        assert_eq!(profiler.timing("a").calls, 2);
        assert_eq!(profiler.timing("b").calls, 1);
        assert_eq!(profiler.timing("missing").calls, 0);
        assert_eq!(profiler.iter().count(), 2);

        profiler.reset();
        assert_eq!(profiler.iter().count(), 0);
    }
}
