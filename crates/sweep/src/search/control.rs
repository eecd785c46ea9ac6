//! Hooks between the search and its caller: circuit reporting and
//! cooperative cancellation.

use std::time::{Duration, Instant};

use super::types::{Circuit, SearchStats};

/// Receives every strictly shorter circuit as soon as it is found.
pub trait CircuitSink {
    fn improved(&mut self, circuit: &Circuit);
}

impl<F: FnMut(&Circuit)> CircuitSink for F {
    fn improved(&mut self, circuit: &Circuit) {
        self(circuit)
    }
}

/// Ignores reports; the final outcome still carries the best circuit.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl CircuitSink for Discard {
    fn improved(&mut self, _circuit: &Circuit) {}
}

/// Asked once before every Extend step; returning `true` suspends the search.
pub trait SearchControl {
    fn should_stop(&mut self, stats: &SearchStats) -> bool;
}

impl<F: FnMut(&SearchStats) -> bool> SearchControl for F {
    fn should_stop(&mut self, stats: &SearchStats) -> bool {
        self(stats)
    }
}

/// Never stops; the search runs until exhausted.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl SearchControl for Unbounded {
    fn should_stop(&mut self, _stats: &SearchStats) -> bool {
        false
    }
}

/// Step and wall-clock budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct Budget {
    pub max_steps: Option<u64>,
    pub deadline: Option<Instant>,
}

impl Budget {
    /// The clock is only read every this many steps.
    const CLOCK_STRIDE: u64 = 1024;

    pub fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
            deadline: None,
        }
    }

    pub fn time(limit: Duration) -> Self {
        Self {
            max_steps: None,
            deadline: Some(Instant::now() + limit),
        }
    }

    pub fn with_steps(self, max_steps: Option<u64>) -> Self {
        Self { max_steps, ..self }
    }

    pub fn with_time(self, limit: Option<Duration>) -> Self {
        Self {
            deadline: limit.map(|l| Instant::now() + l),
            ..self
        }
    }
}

impl SearchControl for Budget {
    fn should_stop(&mut self, stats: &SearchStats) -> bool {
        if self.max_steps.is_some_and(|max| stats.steps >= max) {
            return true;
        }
        match self.deadline {
            Some(deadline) if stats.steps % Self::CLOCK_STRIDE == 0 => Instant::now() >= deadline,
            _ => false,
        }
    }
}
