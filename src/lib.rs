// Isolation agents: depth-limited minimax, alpha-beta with iterative deepening,
// and a tournament harness to pit them against each other.
pub mod agent;
pub mod board;
pub mod search;
pub mod tournament;

pub use agent::{Agent, AlphaBetaPlayer, MinimaxPlayer, RandomPlayer};
pub use board::{Board, GameState, Move, Player};
