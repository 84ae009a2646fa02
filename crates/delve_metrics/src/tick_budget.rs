//! Wall-clock cost of simulation ticks against the tick budget
//!
//! The budget is the simulated time one tick advances. A tick whose real cost
//! exceeds it is an overrun: the host fell behind real time on that tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Ticks kept for [`TickBudget::load`].
const RECENT_TICKS: usize = 60;

#[derive(Debug)]
pub struct TickBudget {
    budget: Duration,
    started: Option<Instant>,
    recent: VecDeque<Duration>,
    ticks: u64,
    overruns: u64,
    total: Duration,
    worst: Duration,
}

impl TickBudget {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            started: None,
            recent: VecDeque::with_capacity(RECENT_TICKS),
            ticks: 0,
            overruns: 0,
            total: Duration::ZERO,
            worst: Duration::ZERO,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Close the tick opened by [`begin`](Self::begin) and return its cost.
    /// Without an open tick nothing is recorded.
    pub fn end(&mut self) -> Duration {
        match self.started.take() {
            Some(start) => {
                let cost = start.elapsed();
                self.record(cost);
                cost
            }
            None => Duration::ZERO,
        }
    }

    /// Account one tick that cost `cost`.
    pub fn record(&mut self, cost: Duration) {
        if self.recent.len() == RECENT_TICKS {
            self.recent.pop_front();
        }
        self.recent.push_back(cost);
        self.ticks += 1;
        self.total += cost;
        self.worst = self.worst.max(cost);
        if cost > self.budget {
            self.overruns += 1;
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks that took longer than the budget.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn worst(&self) -> Duration {
        self.worst
    }

    /// Mean cost over every recorded tick.
    pub fn average(&self) -> Duration {
        if self.ticks == 0 {
            Duration::ZERO
        } else {
            self.total.div_f64(self.ticks as f64)
        }
    }

    /// Mean cost of the most recent ticks as a fraction of the budget.
    /// Above `1.0` the simulation cannot keep up with real time.
    pub fn load(&self) -> f64 {
        if self.recent.is_empty() || self.budget.is_zero() {
            return 0.0;
        }
        let sum: Duration = self.recent.iter().sum();
        sum.as_secs_f64() / self.recent.len() as f64 / self.budget.as_secs_f64()
    }
}
