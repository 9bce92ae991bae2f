use crate::board::{GameState, Move};
use crate::search::eval::Evaluator;
use crate::search::noise::choose_uniform;
use crate::search::walker::{Node, Walker};
use crate::search::{Clock, DepthLimitedSearch, SearchParams, SearchResult, SearchTimeout, TimeoutLog, TimeoutSource};
use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Plain depth-limited minimax, full enumeration to the target depth.
pub struct MinimaxSearcher<G> {
    evaluator: Box<dyn Evaluator<G>>,
    params: SearchParams,
    rng: SmallRng,
    timeouts: TimeoutLog,
}

impl<G: GameState> MinimaxSearcher<G> {
    pub fn new(evaluator: impl Evaluator<G> + 'static, params: SearchParams) -> Self {
        Self {
            evaluator: Box::new(evaluator),
            params,
            rng: SmallRng::seed_from_u64(params.seed),
            timeouts: TimeoutLog::new(),
        }
    }

    /// Best move for the side to move at `depth` plies.
    ///
    /// Only the root entry checkpoint propagates a timeout. A timeout deeper in
    /// the tree stops the root loop and the best move found so far is returned
    /// with `interrupted` set.
    pub fn minimax(&mut self, state: &G, depth: u32, clock: &dyn Clock) -> Result<SearchResult, SearchTimeout> {
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
        let mut best_score = f64::NEG_INFINITY;
        let mut interrupted = false;
        for mv in moves {
            match min_value(&mut walk, &state.forecast_move(mv), 1) {
                Ok(score) => {
                    if score > best_score { best_score = score; best_move = mv; }
                }
                Err(timeout) => {
                    debug!("minimax root interrupted ({timeout}), keeping {best_move}");
                    interrupted = true;
                    break;
                }
            }
        }
        Ok(walk.finish(best_move, best_score, interrupted))
    }
}

impl<G: GameState> DepthLimitedSearch<G> for MinimaxSearcher<G> {
    fn search(&mut self, state: &G, depth: u32, clock: &dyn Clock) -> Result<SearchResult, SearchTimeout> {
        self.minimax(state, depth, clock)
    }
}

impl<G> TimeoutSource for MinimaxSearcher<G> {
    fn timeouts(&self) -> &TimeoutLog { &self.timeouts }
}

fn max_value<G: GameState>(walk: &mut Walker<'_, G>, state: &G, depth: u32) -> Result<f64, SearchTimeout> {
    let moves = match walk.visit(state, depth)? {
        Node::Terminal(score) => return Ok(score),
        Node::Expand(moves) => moves,
    };
    let mut v = f64::NEG_INFINITY;
    for mv in moves {
        v = v.max(min_value(walk, &state.forecast_move(mv), depth + 1)?);
    }
    Ok(v)
}

fn min_value<G: GameState>(walk: &mut Walker<'_, G>, state: &G, depth: u32) -> Result<f64, SearchTimeout> {
    let moves = match walk.visit(state, depth)? {
        Node::Terminal(score) => return Ok(score),
        Node::Expand(moves) => moves,
    };
    let mut v = f64::INFINITY;
    for mv in moves {
        v = v.min(max_value(walk, &state.forecast_move(mv), depth + 1)?);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Player};

    #[test]
    fn no_legal_moves_returns_sentinel() {
        // 1x1 board: player one fills the only cell, player two has nowhere to go.
        let mut b = Board::new(1, 1);
        b.apply_move(Move::new(0, 0));
        let mut s = MinimaxSearcher::new(|_: &Board, _: Player| 0.0, SearchParams::default());
        let r = s.minimax(&b, 3, &|| 100.0).expect("clock has plenty of time");
        assert!(r.best_move.is_none());
        assert!(!r.interrupted);
    }
}
