use std::time::{Duration, Instant};

/// Remaining decision time in milliseconds.
pub trait Clock {
    fn time_left(&self) -> f64;
}

impl<F: Fn() -> f64> Clock for F {
    fn time_left(&self) -> f64 { self() }
}

/// Wall-clock budget for a single move, started when the move is requested.
#[derive(Debug, Clone, Copy)]
pub struct MoveTimer {
    start: Instant,
    limit: Duration,
}

impl MoveTimer {
    pub fn start(limit: Duration) -> Self { Self { start: Instant::now(), limit } }

    pub fn from_millis(ms: u64) -> Self { Self::start(Duration::from_millis(ms)) }

    pub fn elapsed(&self) -> Duration { self.start.elapsed() }
}

impl Clock for MoveTimer {
    // Goes negative once the budget is overrun.
    fn time_left(&self) -> f64 {
        self.limit.as_secs_f64() * 1000.0 - self.start.elapsed().as_secs_f64() * 1000.0
    }
}
