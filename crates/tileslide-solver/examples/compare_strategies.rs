//! Compares A* and breadth-first search over many seeded scrambles.
//!
//! For each puzzle both strategies run with the same node cap. The report lists
//! how often each strategy solved the puzzle, the average solution length and
//! explored-node count, and how often A* returned a longer path than BFS.
//!
//! # Usage
//!
//! ```sh
//! cargo run --release --example compare_strategies
//! ```
//!
//! Compare on 4×4 boards with longer scrambles:
//!
//! ```sh
//! cargo run --release --example compare_strategies -- --size 4 --moves 40 --count 200
//! ```
//!
//! Reproduce a run from a phrase:
//!
//! ```sh
//! cargo run --release --example compare_strategies -- --phrase "benchmark set"
//! ```

use std::process;

use clap::Parser;
use rayon::prelude::*;
use tileslide_generator::{PuzzleSeed, ShuffleGenerator};
use tileslide_solver::{Search, SearchLimits, SearchOutcome, Strategy};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board side length.
    #[arg(long, value_name = "N", default_value_t = 3)]
    size: u8,

    /// Random blank moves per scramble.
    #[arg(long, value_name = "COUNT", default_value_t = 60)]
    moves: usize,

    /// Number of puzzles to compare.
    #[arg(long, value_name = "COUNT", default_value_t = 100)]
    count: usize,

    /// Explored-node cap per search.
    #[arg(long, value_name = "COUNT", default_value_t = SearchLimits::DEFAULT_MAX_NODES)]
    max_nodes: usize,

    /// Phrase the puzzle seeds are derived from.
    #[arg(long, value_name = "TEXT")]
    phrase: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    solved: usize,
    total_moves: usize,
    total_nodes: usize,
}

impl Tally {
    fn record(mut self, outcome: &SearchOutcome) -> Self {
        self.total_nodes += outcome.nodes_explored();
        if let Some(solution) = outcome.solution() {
            self.solved += 1;
            self.total_moves += solution.len();
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            solved: self.solved + other.solved,
            total_moves: self.total_moves + other.total_moves,
            total_nodes: self.total_nodes + other.total_nodes,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Report {
    astar: Tally,
    bfs: Tally,
    astar_longer: usize,
}

fn main() {
    let args = Args::parse();
    let generator = match ShuffleGenerator::new(args.size) {
        Ok(generator) => generator.with_moves(args.moves),
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    if args.count == 0 {
        eprintln!("--count must be at least 1.");
        process::exit(1);
    }

    let limits = SearchLimits::default().with_max_nodes(args.max_nodes);
    let report = (0..args.count)
        .into_par_iter()
        .map(|i| {
            let seed = match &args.phrase {
                Some(phrase) => PuzzleSeed::from_phrase(&format!("{phrase}#{i}")),
                None => PuzzleSeed::random(),
            };
            let board = generator.generate_with_seed(seed).board;
            let astar = Search::new(board.clone(), Strategy::AStar)
                .with_limits(limits)
                .run_to_end(|_| {});
            let bfs = Search::new(board, Strategy::BreadthFirst)
                .with_limits(limits)
                .run_to_end(|_| {});
            let astar_longer = match (astar.solution(), bfs.solution()) {
                (Some(a), Some(b)) => usize::from(a.len() > b.len()),
                _ => 0,
            };
            Report {
                astar: Tally::default().record(&astar),
                bfs: Tally::default().record(&bfs),
                astar_longer,
            }
        })
        .reduce(Report::default, |a, b| Report {
            astar: a.astar.merge(b.astar),
            bfs: a.bfs.merge(b.bfs),
            astar_longer: a.astar_longer + b.astar_longer,
        });

    println!("Puzzles:");
    println!("  size: {0}x{0}", args.size);
    println!("  scramble moves: {}", args.moves);
    println!("  count: {}", args.count);
    println!();
    for (strategy, tally) in [(Strategy::AStar, report.astar), (Strategy::BreadthFirst, report.bfs)] {
        println!("{strategy}:");
        println!("  solved: {}/{}", tally.solved, args.count);
        if tally.solved > 0 {
            println!("  average moves: {:.2}", ratio(tally.total_moves, tally.solved));
        }
        println!("  average nodes: {:.0}", ratio(tally.total_nodes, args.count));
        println!();
    }
    println!("A* longer than BFS: {}", report.astar_longer);
}

#[expect(clippy::cast_precision_loss)]
fn ratio(total: usize, count: usize) -> f64 {
    total as f64 / count as f64
}
