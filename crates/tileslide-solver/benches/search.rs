//! Benchmarks for complete searches.
//!
//! # Benchmarks
//!
//! - **`search_3x3`**: A* and BFS on 3×3 boards scrambled from fixed seeds.
//! - **`search_4x4`**: A* on 4×4 boards scrambled from the same seeds.
//! - **`manhattan_distance`**: the heuristic alone on an 8×8 board.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench search
//! ```

use std::{hint, str::FromStr as _};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use tileslide_core::Board;
use tileslide_generator::{PuzzleSeed, ShuffleGenerator};
use tileslide_solver::{Strategy, manhattan_distance, solve};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn boards(size: u8, moves: usize) -> Vec<Board> {
    let generator = ShuffleGenerator::new(size).unwrap().with_moves(moves);
    SEEDS
        .into_iter()
        .map(|seed| {
            let seed = PuzzleSeed::from_str(seed).unwrap();
            generator.generate_with_seed(seed).board
        })
        .collect()
}

fn bench_search_3x3(c: &mut Criterion) {
    for (i, board) in boards(3, 40).into_iter().enumerate() {
        for strategy in Strategy::ALL {
            c.bench_with_input(
                BenchmarkId::new(format!("search_3x3_{strategy}"), format!("seed_{i}")),
                &board,
                |b, board| {
                    b.iter_batched(
                        || hint::black_box(board.clone()),
                        |board| solve(&board, strategy),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
}

fn bench_search_4x4(c: &mut Criterion) {
    for (i, board) in boards(4, 30).into_iter().enumerate() {
        c.bench_with_input(
            BenchmarkId::new("search_4x4_astar", format!("seed_{i}")),
            &board,
            |b, board| {
                b.iter_batched(
                    || hint::black_box(board.clone()),
                    |board| solve(&board, Strategy::AStar),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_manhattan_distance(c: &mut Criterion) {
    let board = boards(8, 400).swap_remove(0);
    c.bench_function("manhattan_distance", |b| {
        b.iter(|| manhattan_distance(hint::black_box(&board)));
    });
}

criterion_group!(
    benches,
    bench_search_3x3,
    bench_search_4x4,
    bench_manhattan_distance
);
criterion_main!(benches);
