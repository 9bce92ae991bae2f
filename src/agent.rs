use crate::board::{Board, GameState, Move};
use crate::search::alphabeta::AlphaBetaSearcher;
use crate::search::driver::{FixedDepth, IterativeDeepening};
use crate::search::eval::{Evaluator, Heuristic, WeightedScore};
use crate::search::minimax::MinimaxSearcher;
use crate::search::noise::choose_uniform;
use crate::search::{Clock, DepthLimitedSearch, SearchParams};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A player that can be asked for a move. `get_move` never fails: when no
/// decision could be reached it answers `Move::NONE`.
pub trait Agent<G: GameState> {
    fn get_move(&mut self, state: &G, clock: &dyn Clock) -> Move;

    /// Mean depth of the timeouts seen so far, -1 when there were none.
    fn average_timeout_depth(&self) -> f64 { -1.0 }
}

pub type MinimaxPlayer<G> = FixedDepth<MinimaxSearcher<G>>;
pub type AlphaBetaPlayer<G> = IterativeDeepening<AlphaBetaSearcher<G>>;

impl<G: GameState> FixedDepth<MinimaxSearcher<G>> {
    pub fn minimax(evaluator: impl Evaluator<G> + 'static, params: SearchParams) -> Self {
        FixedDepth::new(MinimaxSearcher::new(evaluator, params), params.search_depth)
    }
}

impl<G: GameState> IterativeDeepening<AlphaBetaSearcher<G>> {
    pub fn alphabeta(evaluator: impl Evaluator<G> + 'static, params: SearchParams) -> Self {
        IterativeDeepening::new(AlphaBetaSearcher::new(evaluator, params), params.timer_threshold)
            .with_max_depth(params.max_depth)
    }
}

impl<G: GameState, S: DepthLimitedSearch<G>> Agent<G> for FixedDepth<S> {
    fn get_move(&mut self, state: &G, clock: &dyn Clock) -> Move { FixedDepth::get_move(self, state, clock) }

    fn average_timeout_depth(&self) -> f64 { FixedDepth::average_timeout_depth(self) }
}

impl<G: GameState, S: DepthLimitedSearch<G>> Agent<G> for IterativeDeepening<S> {
    fn get_move(&mut self, state: &G, clock: &dyn Clock) -> Move { IterativeDeepening::get_move(self, state, clock) }

    fn average_timeout_depth(&self) -> f64 { IterativeDeepening::average_timeout_depth(self) }
}

/// Uniformly random legal moves.
pub struct RandomPlayer {
    rng: SmallRng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }
}

impl<G: GameState> Agent<G> for RandomPlayer {
    fn get_move(&mut self, state: &G, _clock: &dyn Clock) -> Move {
        choose_uniform(&state.legal_moves(), &mut self.rng).unwrap_or(Move::NONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Random,
    Minimax,
    AlphaBeta,
}

/// Recipe for an agent. Specs are plain data so every worker thread can build
/// its own agent instead of sharing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub kind: AgentKind,
    #[serde(default)]
    pub heuristic: Heuristic,
    #[serde(default)]
    pub params: SearchParams,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, kind: AgentKind, heuristic: Heuristic) -> Self {
        Self { name: name.into(), kind, heuristic, params: SearchParams::default() }
    }

    pub fn random(name: impl Into<String>) -> Self { Self::new(name, AgentKind::Random, Heuristic::default()) }

    pub fn minimax(heuristic: Heuristic) -> Self {
        Self::new(format!("MM_{}", heuristic.label()), AgentKind::Minimax, heuristic)
    }

    pub fn alphabeta(heuristic: Heuristic) -> Self {
        Self::new(format!("AB_{}", heuristic.label()), AgentKind::AlphaBeta, heuristic)
    }

    /// Alpha-beta agent scored by `weights`.
    pub fn weighted(name: impl Into<String>, weights: WeightedScore) -> Self {
        Self::new(name, AgentKind::AlphaBeta, Heuristic::Weighted(weights))
    }

    /// Builds a fresh agent; `salt` is mixed into the configured seed so each
    /// game gets its own random stream.
    pub fn build(&self, salt: u64) -> Box<dyn Agent<Board>> {
        let params = SearchParams { seed: self.params.seed ^ salt, ..self.params };
        match self.kind {
            AgentKind::Random => Box::new(RandomPlayer::new(params.seed)),
            AgentKind::Minimax => Box::new(MinimaxPlayer::<Board>::minimax(self.heuristic, params)),
            AgentKind::AlphaBeta => Box::new(AlphaBetaPlayer::<Board>::alphabeta(self.heuristic, params)),
        }
    }
}
