#![allow(dead_code)]

use isobot::board::{Board, Player};
use isobot::search::alphabeta::AlphaBetaSearcher;
use isobot::search::eval::open_move_score;
use isobot::search::{
    Clock, DepthLimitedSearch, SearchParams, SearchResult, SearchTimeout, TimeoutLog, TimeoutSource,
};
use std::cell::Cell;
use std::rc::Rc;

/// 9x9 midgame, player one at (4, 7), player two at (1, 2), player one to move.
pub const AB_STATE: [i64; 84] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 1, 0, 0, 0,
    0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 19, 67,
];

/// 9x9 midgame, player one at (5, 3), player two at (3, 5), player one to move.
pub const MM_STATE: [i64; 84] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0,
    0, 0, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1, 0, 0,
    0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 48, 32,
];

pub fn ab_board() -> Board { Board::from_state(9, 9, &AB_STATE).expect("valid fixture") }

pub fn mm_board() -> Board { Board::from_state(9, 9, &MM_STATE).expect("valid fixture") }

/// Clock that never runs low.
pub fn plenty() -> f64 { 1_000.0 }

/// Clock that is already out of time.
pub fn exhausted() -> f64 { 0.0 }

/// Clock with `calls` healthy readings before it reports zero.
pub fn countdown(calls: u32) -> impl Fn() -> f64 {
    let seen = Cell::new(0u32);
    move || {
        let n = seen.get();
        seen.set(n + 1);
        if n < calls { 1_000.0 } else { 0.0 }
    }
}

/// `open_move_score` that counts its calls.
pub fn counting_open_move() -> (impl Fn(&Board, Player) -> f64 + 'static, Rc<Cell<u64>>) {
    let calls = Rc::new(Cell::new(0u64));
    let seen = Rc::clone(&calls);
    let eval = move |b: &Board, p: Player| {
        seen.set(seen.get() + 1);
        open_move_score(b, p)
    };
    (eval, calls)
}

/// Alpha-beta that publishes the depth it is searching, so a clock can read
/// it, and keeps every completed result.
pub struct DepthTracker {
    inner: AlphaBetaSearcher<Board>,
    depth: Rc<Cell<u32>>,
    pub calls: u32,
    pub completed: Vec<SearchResult>,
}

impl DepthTracker {
    pub fn new() -> (Self, Rc<Cell<u32>>) {
        let depth = Rc::new(Cell::new(0));
        let inner = AlphaBetaSearcher::new(open_move_score, SearchParams::default());
        (Self { inner, depth: Rc::clone(&depth), calls: 0, completed: Vec::new() }, depth)
    }
}

impl TimeoutSource for DepthTracker {
    fn timeouts(&self) -> &TimeoutLog { self.inner.timeouts() }
}

impl DepthLimitedSearch<Board> for DepthTracker {
    fn search(&mut self, state: &Board, depth: u32, clock: &dyn Clock) -> Result<SearchResult, SearchTimeout> {
        self.calls += 1;
        self.depth.set(depth);
        let result = self.inner.search(state, depth, clock)?;
        self.completed.push(result);
        Ok(result)
    }
}

/// Healthy while the tracked depth is at most `last`, exhausted after.
pub fn healthy_through(depth: Rc<Cell<u32>>, last: u32) -> impl Fn() -> f64 {
    move || if depth.get() <= last { 15.0 } else { 0.0 }
}
