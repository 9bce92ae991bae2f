use criterion::{black_box, criterion_group, criterion_main, Criterion};
use isobot::board::{Board, Move};
use isobot::search::alphabeta::AlphaBetaSearcher;
use isobot::search::eval::Heuristic;
use isobot::search::minimax::MinimaxSearcher;
use isobot::search::SearchParams;

fn opened() -> Board {
    let mut b = Board::new(7, 7);
    b.apply_move(Move::new(3, 3));
    b.apply_move(Move::new(2, 4));
    b
}

fn bench_search(c: &mut Criterion) {
    let b = opened();
    let plenty = || 1.0e9;
    c.bench_function("alphabeta_depth_5_improved", |ben| {
        ben.iter(|| {
            let mut s = AlphaBetaSearcher::new(Heuristic::Improved, SearchParams::default());
            let r = s.search_depth(black_box(&b), 5, &plenty);
            black_box(r.map(|r| r.nodes).unwrap_or(0))
        })
    });
    c.bench_function("minimax_depth_3_custom", |ben| {
        ben.iter(|| {
            let mut s = MinimaxSearcher::new(Heuristic::Custom, SearchParams::default());
            let r = s.minimax(black_box(&b), 3, &plenty);
            black_box(r.map(|r| r.nodes).unwrap_or(0))
        })
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
