use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stacker_core::{Board, Piece};
use stacker_engine::{apply_move, enumerate, enumerate_with_spins};

fn ragged_board() -> Board {
    Board::from_rows(&[
        "......J...",
        "L.....JJ..",
        "LL..T.ZZSS",
        "LLTTTZZSSI",
        "OO.IIII..I",
    ])
    .unwrap_or_default()
}

fn bench_enumerate(c: &mut Criterion) {
    let empty = Board::default();
    let ragged = ragged_board();

    for piece in Piece::ALL {
        c.bench_function(&format!("enumerate_{piece}"), |b| {
            b.iter(|| enumerate(black_box(&empty), black_box(piece)))
        });
    }

    c.bench_function("enumerate_with_spins_T_ragged", |b| {
        b.iter(|| enumerate_with_spins(black_box(&ragged), black_box(Piece::T)))
    });
}

fn bench_apply(c: &mut Criterion) {
    let ragged = ragged_board();
    let moves = enumerate(&ragged, Piece::L);

    c.bench_function("apply_all_L_placements", |b| {
        b.iter(|| {
            moves
                .iter()
                .map(|mv| apply_move(black_box(&ragged), mv).1.lines_cleared as u32)
                .sum::<u32>()
        })
    });
}

criterion_group!(benches, bench_enumerate, bench_apply);
criterion_main!(benches);
