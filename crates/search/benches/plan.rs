use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stacker_core::{Board, Piece};
use stacker_engine::ScoreTracker;
use stacker_search::{BeamSearch, Difficulty};

fn midgame_board() -> Board {
    Board::from_rows(&[
        "......J...",
        "L.....JJ..",
        "LL..T.ZZSS",
        "LLTTTZZSS.",
        "OO.IIII..I",
    ])
    .unwrap_or_default()
}

fn bench_plan(c: &mut Criterion) {
    let board = midgame_board();
    let queue = [Piece::T, Piece::I, Piece::O, Piece::L, Piece::S];
    let scoring = ScoreTracker::default();

    for difficulty in Difficulty::ALL {
        let search = BeamSearch::new(difficulty.config());
        c.bench_function(&format!("plan_{difficulty}"), |b| {
            b.iter(|| {
                search.search(
                    black_box(&board),
                    black_box(&scoring),
                    black_box(queue[0]),
                    black_box(&queue[1..]),
                )
            })
        });
    }

    let sequential = BeamSearch::new(Difficulty::Expert.config().with_parallel(false));
    c.bench_function("plan_expert_sequential", |b| {
        b.iter(|| sequential.search(black_box(&board), &scoring, queue[0], &queue[1..]))
    });
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
