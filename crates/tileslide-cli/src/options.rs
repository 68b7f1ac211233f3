use std::convert::Infallible;

use clap::{Args, ValueEnum};
use tileslide_core::{Board, BoardError};
use tileslide_generator::{GeneratedPuzzle, PuzzleSeed, ShuffleGenerator};
use tileslide_solver::Strategy;

/// Search algorithm selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum Algorithm {
    /// A* with the Manhattan-distance heuristic.
    #[default]
    AStar,
    /// Breadth-first search.
    Bfs,
}

impl From<Algorithm> for Strategy {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::AStar => Self::AStar,
            Algorithm::Bfs => Self::BreadthFirst,
        }
    }
}

/// Accepts 64 hex digits as raw seed bytes and hashes anything else.
pub(crate) fn parse_seed(s: &str) -> Result<PuzzleSeed, Infallible> {
    Ok(s.parse().unwrap_or_else(|_| PuzzleSeed::from_phrase(s)))
}

/// Options that describe a scrambled board.
#[derive(Debug, Clone, Args)]
pub(crate) struct ScrambleArgs {
    /// Board side length.
    #[arg(long, value_name = "N", default_value_t = ShuffleGenerator::STARTUP_SIZE)]
    pub(crate) size: u8,

    /// Random blank moves applied to the solved board.
    #[arg(long, value_name = "COUNT", default_value_t = ShuffleGenerator::QUICK_MOVES)]
    pub(crate) shuffle: usize,

    /// Seed as 64 hex digits, or any phrase to hash into a seed.
    #[arg(long, value_name = "SEED", value_parser = parse_seed)]
    pub(crate) seed: Option<PuzzleSeed>,
}

impl ScrambleArgs {
    pub(crate) fn seed_or_random(&self) -> PuzzleSeed {
        self.seed.unwrap_or_else(PuzzleSeed::random)
    }

    pub(crate) fn generate(&self) -> Result<GeneratedPuzzle, BoardError> {
        let generator = ShuffleGenerator::new(self.size)?.with_moves(self.shuffle);
        Ok(generator.generate_with_seed(self.seed_or_random()))
    }
}

/// Prints a board as a grid followed by its one-line form.
pub(crate) fn print_board(board: &Board) {
    println!("{board:#}");
    println!("({board})");
}
