use std::time::{Duration, Instant};

/// Wall-clock budget for one turn of planning.
#[derive(Debug, Clone, Copy)]
pub struct TurnClock {
    started: Instant,
    budget: Duration,
}

impl TurnClock {
    pub fn start(budget_ms: u64) -> Self {
        TurnClock {
            started: Instant::now(),
            budget: Duration::from_millis(budget_ms),
        }
    }

    pub fn expired(&self) -> bool {
        self.started.elapsed() >= self.budget
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
