use crate::board::{GameState, Move, Player};
use crate::search::eval::Evaluator;
use crate::search::{Clock, SearchResult, SearchTimeout, TimeoutLog};
use log::trace;

/// Outcome of entering a node.
pub(crate) enum Node {
    Terminal(f64),
    Expand(Vec<Move>),
}

/// Per-search state shared by the minimax and alpha-beta tree walks: the clock
/// checkpoint, the terminal test and the node counters.
pub(crate) struct Walker<'a, G> {
    evaluator: &'a dyn Evaluator<G>,
    clock: &'a dyn Clock,
    threshold: f64,
    root: Player,
    target: u32,
    timeouts: &'a mut TimeoutLog,
    nodes: u64,
    evaluations: u64,
    deepest: u32,
}

impl<'a, G: GameState> Walker<'a, G> {
    pub(crate) fn new(
        evaluator: &'a dyn Evaluator<G>,
        clock: &'a dyn Clock,
        threshold: f64,
        root: Player,
        target: u32,
        timeouts: &'a mut TimeoutLog,
    ) -> Self {
        // A zero-ply search still has to look one move ahead to pick a move.
        let target = target.max(1);
        Self { evaluator, clock, threshold, root, target, timeouts, nodes: 0, evaluations: 0, deepest: 0 }
    }

    pub(crate) fn checkpoint(&mut self, depth: u32) -> Result<(), SearchTimeout> {
        if self.clock.time_left() < self.threshold {
            trace!("timeout at depth {} (target {})", depth, self.target);
            self.timeouts.record(depth);
            return Err(SearchTimeout { depth });
        }
        Ok(())
    }

    /// Clock first, then the terminal test. Terminal nodes are always scored for
    /// the root player, whoever is to move there.
    pub(crate) fn visit(&mut self, state: &G, depth: u32) -> Result<Node, SearchTimeout> {
        self.checkpoint(depth)?;
        debug_assert!(depth <= self.target, "depth {depth} beyond target {}", self.target);
        self.nodes += 1;
        self.deepest = self.deepest.max(depth);
        let moves = state.legal_moves();
        if depth >= self.target || moves.is_empty() {
            self.evaluations += 1;
            return Ok(Node::Terminal(self.evaluator.score(state, self.root)));
        }
        Ok(Node::Expand(moves))
    }

    pub(crate) fn finish(self, best_move: Move, score: f64, interrupted: bool) -> SearchResult {
        SearchResult {
            best_move,
            score,
            depth: self.target,
            nodes: self.nodes,
            evaluations: self.evaluations,
            deepest: self.deepest,
            interrupted,
        }
    }
}
