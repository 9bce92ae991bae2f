use crate::board::{GameState, Move};
use crate::search::eval::Evaluator;
use crate::search::noise::choose_uniform;
use crate::search::walker::{Node, Walker};
use crate::search::{Clock, DepthLimitedSearch, SearchParams, SearchResult, SearchTimeout, TimeoutLog, TimeoutSource};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Depth-limited minimax with alpha-beta pruning.
///
/// Every node visits its moves in ascending `(row, col)` order, so pruning,
/// the chosen move and the number of evaluator calls are reproducible for a
/// given position, depth and seed.
pub struct AlphaBetaSearcher<G> {
    evaluator: Box<dyn Evaluator<G>>,
    params: SearchParams,
    rng: SmallRng,
    timeouts: TimeoutLog,
}

impl<G: GameState> AlphaBetaSearcher<G> {
    pub fn new(evaluator: impl Evaluator<G> + 'static, params: SearchParams) -> Self {
        Self {
            evaluator: Box::new(evaluator),
            params,
            rng: SmallRng::seed_from_u64(params.seed),
            timeouts: TimeoutLog::new(),
        }
    }

    /// Full-window search from the root.
    pub fn search_depth(&mut self, state: &G, depth: u32, clock: &dyn Clock) -> Result<SearchResult, SearchTimeout> {
        self.alphabeta(state, depth, f64::NEG_INFINITY, f64::INFINITY, clock)
    }

    /// Root of the search. The root only raises alpha; there is no parent bound
    /// for it to fail against. Timeouts propagate unchanged.
    pub fn alphabeta(
        &mut self,
        state: &G,
        depth: u32,
        alpha: f64,
        beta: f64,
        clock: &dyn Clock,
    ) -> Result<SearchResult, SearchTimeout> {
        let mut walk = Walker::new(
            self.evaluator.as_ref(),
            clock,
            self.params.timer_threshold,
            state.active_player(),
            depth,
            &mut self.timeouts,
        );
        walk.checkpoint(0)?;

        let moves = state.legal_moves();
        let Some(mut best_move) = choose_uniform(&moves, &mut self.rng) else {
            return Ok(walk.finish(Move::NONE, f64::NEG_INFINITY, false));
        };
        let mut alpha = alpha;
        for mv in ordered(moves) {
            let v = min_value(&mut walk, &state.forecast_move(mv), alpha, beta, 1)?;
            if v > alpha { alpha = v; best_move = mv; }
        }
        Ok(walk.finish(best_move, alpha, false))
    }
}

impl<G: GameState> DepthLimitedSearch<G> for AlphaBetaSearcher<G> {
    fn search(&mut self, state: &G, depth: u32, clock: &dyn Clock) -> Result<SearchResult, SearchTimeout> {
        self.search_depth(state, depth, clock)
    }
}

impl<G> TimeoutSource for AlphaBetaSearcher<G> {
    fn timeouts(&self) -> &TimeoutLog { &self.timeouts }
}

fn ordered(mut moves: Vec<Move>) -> Vec<Move> {
    moves.sort_unstable();
    moves
}

fn max_value<G: GameState>(
    walk: &mut Walker<'_, G>,
    state: &G,
    mut alpha: f64,
    beta: f64,
    depth: u32,
) -> Result<f64, SearchTimeout> {
    let moves = match walk.visit(state, depth)? {
        Node::Terminal(score) => return Ok(score),
        Node::Expand(moves) => moves,
    };
    let mut v = f64::NEG_INFINITY;
    for mv in ordered(moves) {
        v = v.max(min_value(walk, &state.forecast_move(mv), alpha, beta, depth + 1)?);
        if v >= beta { return Ok(v); }
        alpha = alpha.max(v);
    }
    Ok(v)
}

fn min_value<G: GameState>(
    walk: &mut Walker<'_, G>,
    state: &G,
    alpha: f64,
    mut beta: f64,
    depth: u32,
) -> Result<f64, SearchTimeout> {
    let moves = match walk.visit(state, depth)? {
        Node::Terminal(score) => return Ok(score),
        Node::Expand(moves) => moves,
    };
    let mut v = f64::INFINITY;
    for mv in ordered(moves) {
        v = v.min(max_value(walk, &state.forecast_move(mv), alpha, beta, depth + 1)?);
        if v <= alpha { return Ok(v); }
        beta = beta.min(v);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Player};

    #[test]
    fn ordering_is_row_major_ascending() {
        let moves = vec![Move::new(2, 1), Move::new(0, 4), Move::new(2, 0), Move::new(0, 0)];
        assert_eq!(ordered(moves), vec![Move::new(0, 0), Move::new(0, 4), Move::new(2, 0), Move::new(2, 1)]);
    }

    #[test]
    fn narrow_window_keeps_fallback_move() {
        // With alpha already at +inf no child can raise it, so the seeded fallback stands.
        let b = Board::default();
        let mut s = AlphaBetaSearcher::new(|_: &Board, _: Player| 1.0, SearchParams::default());
        let r = s.alphabeta(&b, 1, f64::INFINITY, f64::INFINITY, &|| 100.0).expect("no timeout");
        assert!(b.legal_moves().contains(&r.best_move));
    }
}
