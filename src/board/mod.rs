pub mod isolation;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use isolation::Board;

/// A board coordinate `(row, col)`. Ordering is lexicographic on `(row, col)`,
/// which is the order alpha-beta visits moves in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: i32,
    pub col: i32,
}

impl Move {
    /// Returned when no decision was reached or no legal move exists.
    pub const NONE: Move = Move { row: -1, col: -1 };

    pub const fn new(row: i32, col: i32) -> Self { Self { row, col } }

    pub fn is_none(&self) -> bool { *self == Self::NONE }
}

impl From<(i32, i32)> for Move {
    fn from((row, col): (i32, i32)) -> Self { Self { row, col } }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self { Player::One => Player::Two, Player::Two => Player::One }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Player::One => write!(f, "player 1"), Player::Two => write!(f, "player 2") }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("layout has {got} entries, expected {expected} for a {width}x{height} board")]
    LayoutLength { width: usize, height: usize, expected: usize, got: usize },
    #[error("cell index {index} is outside a board of {cells} cells")]
    LocationOutOfRange { index: i64, cells: usize },
    #[error("illegal move {mv} for {player}")]
    IllegalMove { mv: Move, player: Player },
}

/// What the search core needs from a game position.
///
/// Implementations must be persistent from the searcher's point of view:
/// `forecast_move` returns a new state and leaves `self` untouched, so sibling
/// branches never observe each other's moves.
pub trait GameState: Clone {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn active_player(&self) -> Player;
    fn move_count(&self) -> usize;

    /// Legal moves for `player`, in the implementation's generation order.
    fn legal_moves_for(&self, player: Player) -> Vec<Move>;

    /// Legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Move> { self.legal_moves_for(self.active_player()) }

    fn forecast_move(&self, mv: Move) -> Self;

    fn player_location(&self, player: Player) -> Option<Move>;

    fn opponent(&self, player: Player) -> Player { player.opponent() }

    fn is_loser(&self, player: Player) -> bool {
        player == self.active_player() && self.legal_moves().is_empty()
    }

    fn is_winner(&self, player: Player) -> bool {
        player != self.active_player() && self.legal_moves().is_empty()
    }
}
