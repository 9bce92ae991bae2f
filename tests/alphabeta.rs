mod common;

use common::DepthTracker;
use isobot::board::{Board, GameState, Move};
use isobot::search::alphabeta::AlphaBetaSearcher;
use isobot::search::driver::IterativeDeepening;
use isobot::search::eval::{improved_score, open_move_score};
use isobot::search::minimax::MinimaxSearcher;
use isobot::search::{SearchParams, SearchTimeout, TimeoutSource};
use pretty_assertions::assert_eq;

fn searcher() -> AlphaBetaSearcher<Board> {
    AlphaBetaSearcher::new(open_move_score, SearchParams::default())
}

#[test]
fn pruning_at_depth_two() {
    let (eval, calls) = common::counting_open_move();
    let mut s = AlphaBetaSearcher::new(eval, SearchParams::default());
    let r = s.search_depth(&common::ab_board(), 2, &common::plenty).expect("no timeout");
    assert_eq!(r.best_move, Move::new(6, 6));
    assert_eq!(calls.get(), 16);
    assert_eq!(r.evaluations, 16);
}

#[test]
fn pruning_at_depths_one_and_three() {
    let b = common::ab_board();
    let r1 = searcher().search_depth(&b, 1, &common::plenty).expect("no timeout");
    assert_eq!((r1.best_move, r1.evaluations, r1.score), (Move::new(6, 6), 4, 6.0));
    let r3 = searcher().search_depth(&b, 3, &common::plenty).expect("no timeout");
    assert_eq!((r3.best_move, r3.evaluations, r3.score), (Move::new(5, 5), 34, 6.0));
}

#[test]
fn prunes_where_minimax_cannot() {
    let r = searcher().search_depth(&common::mm_board(), 2, &common::plenty).expect("no timeout");
    assert_eq!(r.best_move, Move::new(3, 2));
    assert_eq!(r.evaluations, 11);
}

#[test]
fn empty_board_tries_every_cell() {
    let r = searcher().search_depth(&Board::new(7, 7), 1, &common::plenty).expect("no timeout");
    assert_eq!(r.evaluations, 49);
    // First cell in row-major order with eight knight moves.
    assert_eq!(r.best_move, Move::new(2, 2));
    assert_eq!(r.score, 8.0);
}

#[test]
fn agrees_with_minimax_on_value_and_move() {
    for board in [common::ab_board(), common::mm_board()] {
        for depth in 1..=3 {
            let mut mm = MinimaxSearcher::new(improved_score, SearchParams::default());
            let mut ab = AlphaBetaSearcher::new(improved_score, SearchParams::default());
            let want = mm.minimax(&board, depth, &common::plenty).expect("no timeout");
            let got = ab.search_depth(&board, depth, &common::plenty).expect("no timeout");
            assert_eq!(got.score, want.score, "depth {depth}\n{board}");
            assert!(got.evaluations <= want.evaluations);
        }
    }
}

#[test]
fn agrees_with_minimax_on_open_move_fixtures() {
    for (board, depth) in [(common::ab_board(), 2), (common::ab_board(), 3), (common::mm_board(), 3)] {
        let want = MinimaxSearcher::new(open_move_score, SearchParams::default())
            .minimax(&board, depth, &common::plenty)
            .expect("no timeout");
        let got = searcher().search_depth(&board, depth, &common::plenty).expect("no timeout");
        assert_eq!((got.best_move, got.score), (want.best_move, want.score), "depth {depth}");
    }
}

#[test]
fn root_timeout_propagates() {
    let mut s = searcher();
    let err = s.search_depth(&common::ab_board(), 3, &common::exhausted).unwrap_err();
    assert_eq!(err, SearchTimeout { depth: 0 });
}

#[test]
fn deep_timeout_propagates_instead_of_returning_partial_result() {
    let mut s = searcher();
    let err = s.search_depth(&common::ab_board(), 3, &common::countdown(2)).unwrap_err();
    assert_eq!(err, SearchTimeout { depth: 2 });
    assert_eq!(s.timeouts().depths(), &[2]);
}

#[test]
fn no_moves_yields_sentinel() {
    let mut b = Board::new(1, 1);
    b.apply_move(Move::new(0, 0));
    let r = searcher().search_depth(&b, 2, &common::plenty).expect("no timeout");
    assert!(r.best_move.is_none());
    assert_eq!(r.evaluations, 0);
    assert!(b.legal_moves().is_empty());
}

#[test]
fn iterations_never_look_past_their_depth() {
    let (tracker, depth) = DepthTracker::new();
    let mut id = IterativeDeepening::new(tracker, 10.0);
    // Only depth 1 gets a healthy clock.
    let mv = id.get_move(&common::ab_board(), &common::healthy_through(depth, 1));
    assert_eq!(mv, Move::new(6, 6));
    assert_eq!(id.searcher().calls, 2);
    let done = &id.searcher().completed;
    assert_eq!(done.len(), 1);
    assert_eq!((done[0].depth, done[0].deepest), (1, 1));
}

#[test]
fn deepest_tracks_target_at_every_depth() {
    for depth in 1..=4 {
        let r = searcher().search_depth(&common::ab_board(), depth, &common::plenty).expect("no timeout");
        assert!(r.deepest <= depth, "depth {depth} reached {}", r.deepest);
        assert_eq!(r.deepest, depth);
    }
}
