use super::{BoardError, GameState, Move, Player};
use std::fmt;

/// Knight offsets, in generation order.
const DIRECTIONS: [(i32, i32); 8] = [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 7;

/// Isolation board: two knights on a grid, every visited cell stays blocked.
///
/// Cells are indexed column-major, `row + col * height`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
    locations: [Option<usize>; 2],
    active: Player,
    move_count: usize,
}

impl Default for Board {
    fn default() -> Self { Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT) }
}

fn slot(player: Player) -> usize {
    match player { Player::One => 0, Player::Two => 1 }
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; width * height],
            locations: [None, None],
            active: Player::One,
            move_count: 0,
        }
    }

    /// Builds a board from a flat layout: `width * height` cells (0 blank, anything
    /// else blocked), then the side-to-move bit (0 = player one), player two's cell
    /// index and player one's cell index. Negative indices mean "not placed yet".
    pub fn from_state(width: usize, height: usize, state: &[i64]) -> Result<Self, BoardError> {
        let cells = width * height;
        if state.len() != cells + 3 {
            return Err(BoardError::LayoutLength { width, height, expected: cells + 3, got: state.len() });
        }
        let location = |raw: i64| -> Result<Option<usize>, BoardError> {
            if raw < 0 { return Ok(None); }
            if raw as usize >= cells { return Err(BoardError::LocationOutOfRange { index: raw, cells }); }
            Ok(Some(raw as usize))
        };
        let blocked: Vec<bool> = state[..cells].iter().map(|&c| c != 0).collect();
        let move_count = blocked.iter().filter(|&&b| b).count();
        Ok(Self {
            width,
            height,
            blocked,
            locations: [location(state[cells + 2])?, location(state[cells + 1])?],
            active: if state[cells] == 0 { Player::One } else { Player::Two },
            move_count,
        })
    }

    fn index(&self, mv: Move) -> usize { mv.row as usize + mv.col as usize * self.height }

    fn coord(&self, idx: usize) -> Move { Move::new((idx % self.height) as i32, (idx / self.height) as i32) }

    pub fn move_is_legal(&self, mv: Move) -> bool {
        mv.row >= 0 && (mv.row as usize) < self.height
            && mv.col >= 0 && (mv.col as usize) < self.width
            && !self.blocked[self.index(mv)]
    }

    /// Blank cells in column-major order.
    pub fn blank_spaces(&self) -> Vec<Move> {
        (0..self.width * self.height).filter(|&i| !self.blocked[i]).map(|i| self.coord(i)).collect()
    }

    /// Number of cells that have been visited and are now blocked.
    pub fn visited_count(&self) -> usize { self.blocked.iter().filter(|&&b| b).count() }

    /// Plays `mv` for the side to move without checking legality.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.move_is_legal(mv), "apply_move on blocked or off-board cell {mv}");
        let idx = self.index(mv);
        self.locations[slot(self.active)] = Some(idx);
        self.blocked[idx] = true;
        self.active = self.active.opponent();
        self.move_count += 1;
    }

    pub fn try_apply_move(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.legal_moves().contains(&mv) {
            return Err(BoardError::IllegalMove { mv, player: self.active });
        }
        self.apply_move(mv);
        Ok(())
    }

    /// +inf for the winner, -inf for the loser, 0 while the game is still running.
    pub fn utility(&self, player: Player) -> f64 {
        if self.legal_moves().is_empty() {
            if player == self.active { return f64::NEG_INFINITY; }
            return f64::INFINITY;
        }
        0.0
    }

    fn moves_from(&self, loc: Option<usize>) -> Vec<Move> {
        let Some(idx) = loc else { return self.blank_spaces(); };
        let from = self.coord(idx);
        DIRECTIONS
            .iter()
            .map(|&(dr, dc)| Move::new(from.row + dr, from.col + dc))
            .filter(|&mv| self.move_is_legal(mv))
            .collect()
    }
}

impl GameState for Board {
    fn width(&self) -> usize { self.width }
    fn height(&self) -> usize { self.height }
    fn active_player(&self) -> Player { self.active }
    fn move_count(&self) -> usize { self.move_count }

    fn legal_moves_for(&self, player: Player) -> Vec<Move> { self.moves_from(self.locations[slot(player)]) }

    fn forecast_move(&self, mv: Move) -> Self {
        let mut next = self.clone();
        next.apply_move(mv);
        next
    }

    fn player_location(&self, player: Player) -> Option<Move> {
        self.locations[slot(player)].map(|idx| self.coord(idx))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let margin = self.height.saturating_sub(1).to_string().len();
        write!(f, "{:margin$} ", "")?;
        for col in 0..self.width { write!(f, " {col} ")?; }
        writeln!(f)?;
        for row in 0..self.height {
            write!(f, "{row:>margin$} ")?;
            for col in 0..self.width {
                let idx = row + col * self.height;
                let cell = if self.locations[0] == Some(idx) {
                    '1'
                } else if self.locations[1] == Some(idx) {
                    '2'
                } else if self.blocked[idx] {
                    '-'
                } else {
                    ' '
                };
                write!(f, "|{cell} ")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_moves_stay_on_board() {
        let mut b = Board::new(7, 7);
        b.apply_move(Move::new(0, 0));
        let moves = b.legal_moves_for(Player::One);
        assert_eq!(moves, vec![Move::new(1, 2), Move::new(2, 1)]);
    }

    #[test]
    fn display_marks_players_and_blocked_cells() {
        let mut b = Board::new(3, 3);
        b.apply_move(Move::new(0, 0));
        b.apply_move(Move::new(2, 2));
        let s = b.to_string();
        assert!(s.contains("|1 "), "player one missing:\n{s}");
        assert!(s.contains("|2 "), "player two missing:\n{s}");
    }
}
