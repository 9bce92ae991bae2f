pub mod alphabeta;
pub mod clock;
pub mod driver;
pub mod eval;
pub mod minimax;
pub mod noise;
pub mod timeout;
mod walker;

use crate::board::{GameState, Move};
use serde::{Deserialize, Serialize};

pub use clock::{Clock, MoveTimer};
pub use timeout::{SearchTimeout, TimeoutLog};

/// Safety margin in milliseconds: a checkpoint that sees less time than this aborts.
pub const DEFAULT_TIMER_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Target depth used by the fixed-depth driver.
    pub search_depth: u32,
    pub timer_threshold: f64,
    pub seed: u64,
    /// Upper bound for iterative deepening; unbounded when `None`.
    pub max_depth: Option<u32>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { search_depth: 3, timer_threshold: DEFAULT_TIMER_THRESHOLD, seed: 0, max_depth: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Backed-up value of `best_move` from the root player's point of view.
    pub score: f64,
    pub depth: u32,
    pub nodes: u64,
    pub evaluations: u64,
    /// Deepest depth any terminal test saw; never above `depth`.
    pub deepest: u32,
    /// The root enumeration was cut short by a timeout and `best_move` is the best so far.
    pub interrupted: bool,
}

/// Anything that keeps a log of the timeouts it ran into.
pub trait TimeoutSource {
    fn timeouts(&self) -> &TimeoutLog;
}

/// A depth-limited search the drivers can run repeatedly.
pub trait DepthLimitedSearch<G: GameState>: TimeoutSource {
    fn search(&mut self, state: &G, depth: u32, clock: &dyn Clock) -> Result<SearchResult, SearchTimeout>;
}
