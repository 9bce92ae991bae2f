use crate::board::{GameState, Move};
use crate::search::{Clock, DepthLimitedSearch, SearchResult, TimeoutSource};
use log::debug;

/// One search at a fixed depth.
///
/// Whatever that search returns is trusted, including a root enumeration the
/// searcher cut short itself. Only a timeout that escapes the search yields
/// `Move::NONE`.
pub struct FixedDepth<S> {
    searcher: S,
    depth: u32,
}

impl<S> FixedDepth<S> {
    pub fn new(searcher: S, depth: u32) -> Self { Self { searcher, depth } }

    pub fn depth(&self) -> u32 { self.depth }

    pub fn searcher(&self) -> &S { &self.searcher }

    pub fn get_move<G: GameState>(&mut self, state: &G, clock: &dyn Clock) -> Move
    where
        S: DepthLimitedSearch<G>,
    {
        match self.searcher.search(state, self.depth, clock) {
            Ok(result) => result.best_move,
            Err(timeout) => {
                debug!("fixed-depth search abandoned: {timeout}");
                Move::NONE
            }
        }
    }

    pub fn average_timeout_depth(&self) -> f64
    where
        S: TimeoutSource,
    {
        self.searcher.timeouts().average_depth()
    }
}

/// Searches depth 1, 2, 3, ... until the clock drops below the threshold and
/// answers with the last depth that completed. An iteration that timed out, or
/// came back interrupted, is discarded whole.
pub struct IterativeDeepening<S> {
    searcher: S,
    threshold: f64,
    max_depth: Option<u32>,
    depth: u32,
    last: Option<SearchResult>,
}

impl<S> IterativeDeepening<S> {
    pub fn new(searcher: S, threshold: f64) -> Self {
        Self { searcher, threshold, max_depth: None, depth: 0, last: None }
    }

    pub fn with_max_depth(mut self, max_depth: Option<u32>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn searcher(&self) -> &S { &self.searcher }

    /// Depth of the iteration started most recently during the last decision.
    pub fn current_depth(&self) -> u32 { self.depth }

    /// Result of the deepest completed iteration of the last decision.
    pub fn last_result(&self) -> Option<&SearchResult> { self.last.as_ref() }

    pub fn completed_depth(&self) -> u32 { self.last.map_or(0, |r| r.depth) }

    pub fn get_move<G: GameState>(&mut self, state: &G, clock: &dyn Clock) -> Move
    where
        S: DepthLimitedSearch<G>,
    {
        self.depth = 0;
        self.last = None;
        while clock.time_left() > self.threshold {
            if self.max_depth.is_some_and(|max| self.depth >= max) { break; }
            self.depth += 1;
            let result = match self.searcher.search(state, self.depth, clock) {
                Ok(result) if !result.interrupted => result,
                Ok(_) => {
                    debug!("depth {} interrupted, discarding", self.depth);
                    break;
                }
                Err(timeout) => {
                    debug!("depth {} abandoned: {timeout}", self.depth);
                    break;
                }
            };
            debug!(
                "depth {} complete: {} score {} ({} nodes, {} evals)",
                result.depth, result.best_move, result.score, result.nodes, result.evaluations
            );
            self.last = Some(result);
            // Nothing to choose from; deeper iterations cannot change that.
            if result.best_move.is_none() { break; }
        }
        self.last.map_or(Move::NONE, |r| r.best_move)
    }

    pub fn average_timeout_depth(&self) -> f64
    where
        S: TimeoutSource,
    {
        self.searcher.timeouts().average_depth()
    }
}
