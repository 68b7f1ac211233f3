//! Seeded scramble generation for sliding-tile puzzles.
//!
//! [`ShuffleGenerator`] walks the blank randomly away from the solved board, so
//! every puzzle it produces is solvable. A [`PuzzleSeed`] makes the walk
//! reproducible and can be shared as a hex string.
//!
//! # Examples
//!
//! ```
//! use tileslide_generator::ShuffleGenerator;
//!
//! let puzzle = ShuffleGenerator::new(3)?.generate();
//! println!("seed: {}", puzzle.seed);
//! println!("{:#}", puzzle.board);
//! # Ok::<(), tileslide_core::BoardError>(())
//! ```

pub use self::{seed::*, shuffle::*};

mod seed;
mod shuffle;
