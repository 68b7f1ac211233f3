//! Benchmarks for scramble generation.
//!
//! Measures `ShuffleGenerator::generate_with_seed` with the default scramble
//! length for each supported board size.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use tileslide_core::Board;
use tileslide_generator::{PuzzleSeed, ShuffleGenerator};

const SEED: &str = "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

fn bench_generate(c: &mut Criterion) {
    let seed = PuzzleSeed::from_str(SEED).unwrap();
    for size in Board::MIN_SIZE..=Board::MAX_SIZE {
        let generator = ShuffleGenerator::new(size).unwrap();
        c.bench_with_input(
            BenchmarkId::new("generate", format!("{size}x{size}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    |seed| generator.generate_with_seed(seed),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
