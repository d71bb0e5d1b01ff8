use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use snapshot_chess::game_state::game_state::GameState;
use snapshot_chess::move_generation::perft::{perft, PerftCounts};

/// A perft run that leans on one special-move path of make/undo.
struct PathCase {
    path: &'static str,
    fen: &'static str,
    depth: u8,
    nodes: u64,
    tally: fn(&PerftCounts) -> u64,
    expected_tally: u64,
}

const PATH_CASES: &[PathCase] = &[
    PathCase {
        path: "castling",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 2,
        nodes: 2039,
        tally: |counts| counts.castles,
        expected_tally: 91,
    },
    PathCase {
        path: "en_passant",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 3,
        nodes: 2812,
        tally: |counts| counts.en_passant,
        expected_tally: 2,
    },
    PathCase {
        path: "promotion",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        depth: 2,
        nodes: 264,
        tally: |counts| counts.promotions,
        expected_tally: 48,
    },
];

fn bench_special_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_paths");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(20);

    for case in PATH_CASES {
        let mut game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        let counts = perft(&mut game, case.depth);
        assert_eq!(counts.nodes, case.nodes, "{} node count", case.path);
        assert_eq!((case.tally)(&counts), case.expected_tally, "{} tally", case.path);

        group.throughput(Throughput::Elements(case.nodes));
        group.bench_function(BenchmarkId::new(case.path, format!("d{}", case.depth)), |b| {
            b.iter(|| black_box(perft(black_box(&mut game), case.depth).nodes));
        });
    }

    group.finish();
}

/// One make/undo per legal move through the validated public API, i.e. the
/// selective recompute and snapshot restore without any search on top.
fn bench_make_undo_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_undo_cycle");
    group.sample_size(50);

    for (name, fen) in [
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        ("kiwipete", "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
    ] {
        let mut game = GameState::from_fen(fen).expect("benchmark FEN should parse");
        let moves = game.calculate_legals();

        group.throughput(Throughput::Elements(moves.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                for &mv in &moves {
                    game.make_move(black_box(mv)).expect("legal move should apply");
                    game.undo_move().expect("undo should succeed");
                }
            });
        });
        assert_eq!(game.to_fen(), fen, "{name} must be restored");
    }

    group.finish();
}

criterion_group!(perft_benches, bench_special_paths, bench_make_undo_cycle);
criterion_main!(perft_benches);
