use thiserror::Error;

/// Raised by a checkpoint that found less time left than the safety threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search timed out at depth {depth}")]
pub struct SearchTimeout {
    pub depth: u32,
}

/// Depths at which timeouts were observed, kept across decisions for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeoutLog {
    depths: Vec<u32>,
}

impl TimeoutLog {
    pub fn new() -> Self { Self::default() }

    pub fn record(&mut self, depth: u32) { self.depths.push(depth); }

    pub fn depths(&self) -> &[u32] { &self.depths }

    pub fn len(&self) -> usize { self.depths.len() }

    pub fn is_empty(&self) -> bool { self.depths.is_empty() }

    /// Mean recorded depth, or -1.0 when nothing was recorded.
    pub fn average_depth(&self) -> f64 {
        if self.depths.is_empty() { return -1.0; }
        self.depths.iter().map(|&d| d as f64).sum::<f64>() / self.depths.len() as f64
    }
}
