use crate::agent::{Agent, AgentSpec};
use crate::board::{Board, GameState, Move, Player};
use crate::search::eval::Heuristic;
use crate::search::noise::choose_uniform;
use crate::search::{Clock, MoveTimer};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

mod report;

pub use report::{OpponentRow, Tally, TournamentReport, WinRate};

/// Random plies played before each fair pair of games.
pub const OPENING_PLIES: usize = 2;

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Fair pairs played by every test agent against every CPU agent.
    pub matches: usize,
    pub time_limit_ms: u64,
    pub threads: usize,
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub progress: bool,
    pub test_agents: Vec<AgentSpec>,
    pub cpu_agents: Vec<AgentSpec>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            matches: 100,
            time_limit_ms: 150,
            threads: 4,
            seed: 0,
            width: 7,
            height: 7,
            progress: true,
            test_agents: vec![
                AgentSpec::alphabeta(Heuristic::Improved),
                AgentSpec::alphabeta(Heuristic::Custom),
                AgentSpec::alphabeta(Heuristic::Custom2),
                AgentSpec::alphabeta(Heuristic::Custom3),
            ],
            cpu_agents: vec![
                AgentSpec::random("Random"),
                AgentSpec::minimax(Heuristic::Open),
                AgentSpec::minimax(Heuristic::Center),
                AgentSpec::minimax(Heuristic::Improved),
                AgentSpec::alphabeta(Heuristic::Open),
                AgentSpec::alphabeta(Heuristic::Center),
                AgentSpec::alphabeta(Heuristic::Improved),
            ],
        }
    }
}

impl TournamentConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, TournamentError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| TournamentError::Io { path: path.to_path_buf(), source })?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn validate(&self) -> Result<(), TournamentError> {
        let invalid = |msg: &str| Err(TournamentError::Invalid(msg.to_string()));
        if self.matches == 0 { return invalid("matches must be at least 1"); }
        if self.time_limit_ms == 0 { return invalid("time_limit_ms must be positive"); }
        if self.test_agents.is_empty() { return invalid("no test agents"); }
        if self.cpu_agents.is_empty() { return invalid("no cpu agents"); }
        if self.width * self.height <= OPENING_PLIES { return invalid("board too small for the opening"); }
        // Iterative deepening capped at zero never completes a depth.
        if let Some(spec) = self.test_agents.iter().chain(&self.cpu_agents).find(|s| s.params.max_depth == Some(0)) {
            return Err(TournamentError::Invalid(format!("agent {} has max_depth 0", spec.name)));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The side to move had no legal moves.
    Normal,
    /// The mover returned after its time ran out.
    Timeout,
    /// The mover returned a move that was not legal while legal moves existed.
    Forfeit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub winner: Player,
    pub termination: Termination,
    pub history: Vec<Move>,
    /// Indexed by seat: `[first, second]`.
    pub average_timeout_depths: [f64; 2],
}

/// Plays `board` to the end. `first` moves for `Player::One`, `second` for
/// `Player::Two`; each turn gets a fresh `time_limit` budget.
pub fn play_match(
    mut board: Board,
    first: &mut dyn Agent<Board>,
    second: &mut dyn Agent<Board>,
    time_limit: Duration,
) -> MatchOutcome {
    let mut history = Vec::new();
    let (winner, termination) = loop {
        let legal = board.legal_moves();
        let mover = board.active_player();
        if legal.is_empty() { break (mover.opponent(), Termination::Normal); }
        let agent: &mut dyn Agent<Board> = match mover {
            Player::One => &mut *first,
            Player::Two => &mut *second,
        };
        let timer = MoveTimer::start(time_limit);
        let mv = agent.get_move(&board, &timer);
        if timer.time_left() < 0.0 {
            warn!("{mover} overran its time after {} plies", history.len());
            break (mover.opponent(), Termination::Timeout);
        }
        if !legal.contains(&mv) {
            warn!("{mover} forfeited with {mv} while {} moves were legal", legal.len());
            break (mover.opponent(), Termination::Forfeit);
        }
        history.push(mv);
        board.apply_move(mv);
    };
    MatchOutcome {
        winner,
        termination,
        history,
        average_timeout_depths: [first.average_timeout_depth(), second.average_timeout_depth()],
    }
}

/// Plays up to `plies` uniformly random moves from `board`.
pub fn random_opening(board: &Board, plies: usize, rng: &mut SmallRng) -> Vec<Move> {
    let mut board = board.clone();
    let mut moves = Vec::with_capacity(plies);
    for _ in 0..plies {
        let Some(mv) = choose_uniform(&board.legal_moves(), rng) else { break; };
        board.apply_move(mv);
        moves.push(mv);
    }
    moves
}

#[derive(Debug, Clone)]
struct Game {
    cpu: usize,
    test: usize,
    test_first: bool,
    opening: Vec<Move>,
    salt: u64,
}

#[derive(Debug, Clone)]
pub(crate) struct GameRecord {
    cpu: usize,
    test: usize,
    test_won: bool,
    test_seat: Player,
    outcome: MatchOutcome,
}

/// Every test agent meets every CPU agent `matches` times; each meeting is a
/// pair of games from the same random opening with the seats swapped.
fn schedule(config: &TournamentConfig) -> Vec<Game> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let empty = Board::new(config.width, config.height);
    let mut games = Vec::new();
    for cpu in 0..config.cpu_agents.len() {
        for _ in 0..config.matches {
            let opening = random_opening(&empty, OPENING_PLIES, &mut rng);
            for test in 0..config.test_agents.len() {
                for test_first in [true, false] {
                    let salt = games.len() as u64;
                    games.push(Game { cpu, test, test_first, opening: opening.clone(), salt });
                }
            }
        }
    }
    games
}

fn play_game(config: &TournamentConfig, game: &Game) -> GameRecord {
    let mut board = Board::new(config.width, config.height);
    for &mv in &game.opening { board.apply_move(mv); }
    let mut test = config.test_agents[game.test].build(game.salt);
    let mut cpu = config.cpu_agents[game.cpu].build(game.salt.rotate_left(32));
    let limit = Duration::from_millis(config.time_limit_ms);
    let (outcome, test_seat) = if game.test_first {
        (play_match(board, test.as_mut(), cpu.as_mut(), limit), Player::One)
    } else {
        (play_match(board, cpu.as_mut(), test.as_mut(), limit), Player::Two)
    };
    GameRecord { cpu: game.cpu, test: game.test, test_won: outcome.winner == test_seat, test_seat, outcome }
}

pub fn run_tournament(config: &TournamentConfig) -> Result<TournamentReport, TournamentError> {
    config.validate()?;
    let games = schedule(config);
    info!(
        "playing {} games ({} test x {} cpu agents, {} matches, {} ms per move)",
        games.len(), config.test_agents.len(), config.cpu_agents.len(), config.matches, config.time_limit_ms
    );

    let bar = if config.progress { ProgressBar::new(games.len() as u64) } else { ProgressBar::hidden() };
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]") {
        bar.set_style(style);
    }
    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads.max(1)).build()?;
    let records: Vec<GameRecord> = pool.install(|| {
        games
            .par_iter()
            .map(|game| {
                let record = play_game(config, game);
                bar.inc(1);
                record
            })
            .collect()
    });
    bar.finish_and_clear();

    Ok(report::tally(config, &records))
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Normal => write!(f, "normal"),
            Termination::Timeout => write!(f, "timeout"),
            Termination::Forfeit => write!(f, "forfeit"),
        }
    }
}

pub(crate) fn depth_means(records: &[GameRecord], config: &TournamentConfig) -> BTreeMap<String, f64> {
    let mut acc: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for spec in config.test_agents.iter().chain(&config.cpu_agents) {
        acc.entry(spec.name.clone()).or_insert((0.0, 0));
    }
    for r in records {
        let (test_idx, cpu_idx) = match r.test_seat { Player::One => (0, 1), Player::Two => (1, 0) };
        let seats = [
            (&config.test_agents[r.test].name, r.outcome.average_timeout_depths[test_idx]),
            (&config.cpu_agents[r.cpu].name, r.outcome.average_timeout_depths[cpu_idx]),
        ];
        for (name, depth) in seats {
            if depth < 0.0 { continue; }
            let slot = acc.entry(name.clone()).or_insert((0.0, 0));
            slot.0 += depth;
            slot.1 += 1;
        }
    }
    acc.into_iter().map(|(name, (sum, n))| (name, if n == 0 { -1.0 } else { sum / n as f64 })).collect()
}
