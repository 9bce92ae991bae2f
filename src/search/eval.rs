use crate::board::{Board, GameState, Player};
use serde::{Deserialize, Serialize};

/// Scores a position for `player`: +inf when `player` has won, -inf when it has
/// lost, finite otherwise.
pub trait Evaluator<G> {
    fn score(&self, state: &G, player: Player) -> f64;
}

impl<G, F> Evaluator<G> for F
where
    F: Fn(&G, Player) -> f64,
{
    fn score(&self, state: &G, player: Player) -> f64 { self(state, player) }
}

/// Largest number of knight moves from any square.
const MAX_MOVES: f64 = 8.0;
const OPENNESS_RADIUS: i32 = 4;
/// Cells in the openness window, minus the player's own.
const MAX_OPENNESS: f64 = 80.0;
const OPENNESS_GUARD: f64 = 0.0001 * MAX_OPENNESS;

fn decided(game: &Board, player: Player) -> Option<f64> {
    if game.is_loser(player) { return Some(f64::NEG_INFINITY); }
    if game.is_winner(player) { return Some(f64::INFINITY); }
    None
}

pub fn number_moves(game: &Board, player: Player) -> f64 {
    game.legal_moves_for(player).len() as f64
}

/// Open cells within `OPENNESS_RADIUS` rows and columns of the player.
pub fn nearby_openness(game: &Board, player: Player) -> f64 {
    let Some(loc) = game.player_location(player) else { return 0.0; };
    let mut open = 0;
    for row in loc.row - OPENNESS_RADIUS..=loc.row + OPENNESS_RADIUS {
        for col in loc.col - OPENNESS_RADIUS..=loc.col + OPENNESS_RADIUS {
            if game.move_is_legal((row, col).into()) { open += 1; }
        }
    }
    open as f64
}

/// Squared distance from the centre of the board; 0 for a piece not yet placed.
pub fn centerness(game: &Board, player: Player) -> f64 {
    let Some(loc) = game.player_location(player) else { return 0.0; };
    let (w, h) = (game.width() as f64 / 2.0, game.height() as f64 / 2.0);
    (h - loc.row as f64).powi(2) + (w - loc.col as f64).powi(2)
}

/// Fraction of the board already visited, in `[0, 1]`.
pub fn completeness(game: &Board) -> f64 {
    game.visited_count() as f64 / (game.width() * game.height()) as f64
}

pub fn open_move_score(game: &Board, player: Player) -> f64 {
    if let Some(s) = decided(game, player) { return s; }
    number_moves(game, player)
}

pub fn improved_score(game: &Board, player: Player) -> f64 {
    if let Some(s) = decided(game, player) { return s; }
    number_moves(game, player) - number_moves(game, game.opponent(player))
}

pub fn center_score(game: &Board, player: Player) -> f64 {
    if let Some(s) = decided(game, player) { return s; }
    centerness(game, player)
}

/// Mobility-weighted score with a centre bonus early in the game.
pub fn custom_score(game: &Board, player: Player) -> f64 {
    WeightedScore::default().evaluate(game, player)
}

/// Unnormalized mobility: `2*own - 2*opp + 2*own/opp`.
pub fn custom_score_2(game: &Board, player: Player) -> f64 {
    if let Some(s) = decided(game, player) { return s; }
    let own = number_moves(game, player);
    if own == 0.0 { return f64::NEG_INFINITY; }
    let opp = number_moves(game, game.opponent(player));
    if opp == 0.0 { return f64::INFINITY; }
    2.0 * own - 2.0 * opp + 2.0 * own / opp
}

/// Ratio of own to opponent moves.
pub fn custom_score_3(game: &Board, player: Player) -> f64 {
    if let Some(s) = decided(game, player) { return s; }
    let own = number_moves(game, player);
    if own == 0.0 { return f64::NEG_INFINITY; }
    let opp = number_moves(game, game.opponent(player));
    if opp == 0.0 { return f64::INFINITY; }
    own / opp
}

/// Linear combination of normalized mobility, openness and centerness features.
///
/// Mobility is divided by 8, openness by 80, centerness by the squared
/// half-diagonal. The centerness terms only apply while
/// `completeness < centerness_cutoff`; a cut-off above 1 keeps them on for the
/// whole game. Openness is only computed when one of its weights is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedScore {
    pub own_moves: f64,
    pub opp_moves: f64,
    pub move_ratio: f64,
    pub own_openness: f64,
    pub opp_openness: f64,
    pub openness_ratio: f64,
    pub centerness_cutoff: f64,
    pub own_centerness: f64,
    pub opp_centerness: f64,
    pub centerness_ratio: f64,
}

impl Default for WeightedScore {
    fn default() -> Self {
        Self {
            own_moves: 2.0,
            opp_moves: -2.0,
            move_ratio: 2.0,
            own_openness: 0.0,
            opp_openness: 0.0,
            openness_ratio: 0.0,
            centerness_cutoff: 0.5,
            own_centerness: -1.0,
            opp_centerness: 1.0,
            centerness_ratio: -1.0,
        }
    }
}

impl WeightedScore {
    pub fn evaluate(&self, game: &Board, player: Player) -> f64 {
        if let Some(s) = decided(game, player) { return s; }
        let opponent = game.opponent(player);
        let own = number_moves(game, player) / MAX_MOVES;
        if own == 0.0 { return f64::NEG_INFINITY; }
        let opp = number_moves(game, opponent) / MAX_MOVES;
        if opp == 0.0 { return f64::INFINITY; }
        let ratio = own / opp / MAX_MOVES;

        let mut openness = 0.0;
        if self.own_openness != 0.0 || self.opp_openness != 0.0 || self.openness_ratio != 0.0 {
            let own_o = nearby_openness(game, player) / MAX_OPENNESS;
            let opp_o = nearby_openness(game, opponent) / MAX_OPENNESS;
            let ratio_o = own_o / (opp_o + OPENNESS_GUARD);
            openness = self.own_openness * own_o + self.opp_openness * opp_o + self.openness_ratio * ratio_o;
        }

        let mut center = 0.0;
        if completeness(game) < self.centerness_cutoff {
            let max = (game.width() as f64 / 2.0).powi(2) + (game.height() as f64 / 2.0).powi(2);
            let own_c = centerness(game, player) / max;
            let opp_c = centerness(game, opponent) / max;
            let ratio_c = own_c / (max * opp_c + 0.1);
            center = self.own_centerness * own_c + self.opp_centerness * opp_c + self.centerness_ratio * ratio_c;
        }
        self.own_moves * own + self.opp_moves * opp + self.move_ratio * ratio + openness + center
    }
}

impl Evaluator<Board> for WeightedScore {
    fn score(&self, state: &Board, player: Player) -> f64 { self.evaluate(state, player) }
}

/// Heuristics selectable from config files. `Weighted` carries its own
/// weights, written as `{"weighted": {"own_moves": 1.0, ...}}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    Open,
    Improved,
    Center,
    #[default]
    Custom,
    Custom2,
    Custom3,
    Weighted(WeightedScore),
}

impl Heuristic {
    pub fn evaluate(self, game: &Board, player: Player) -> f64 {
        match self {
            Heuristic::Open => open_move_score(game, player),
            Heuristic::Improved => improved_score(game, player),
            Heuristic::Center => center_score(game, player),
            Heuristic::Custom => custom_score(game, player),
            Heuristic::Custom2 => custom_score_2(game, player),
            Heuristic::Custom3 => custom_score_3(game, player),
            Heuristic::Weighted(w) => w.evaluate(game, player),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Heuristic::Open => "Open",
            Heuristic::Improved => "Improved",
            Heuristic::Center => "Center",
            Heuristic::Custom => "Custom",
            Heuristic::Custom2 => "Custom_2",
            Heuristic::Custom3 => "Custom_3",
            Heuristic::Weighted(_) => "Weighted",
        }
    }
}

impl Evaluator<Board> for Heuristic {
    fn score(&self, state: &Board, player: Player) -> f64 { self.evaluate(state, player) }
}
