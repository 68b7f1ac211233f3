use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;
use tileslide_core::{Board, BoardError, Move};

use crate::PuzzleSeed;

/// A scrambled board together with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// Seed that reproduces this puzzle.
    pub seed: PuzzleSeed,
    /// The scrambled board.
    pub board: Board,
    /// The blank moves applied to the solved board, in order.
    pub scramble: Vec<Move>,
}

/// Scrambles boards by random walks of the blank.
///
/// Starting from the solved board, each step picks uniformly among the legal
/// moves of the blank (undoing the previous move is allowed). Every generated
/// board is therefore reachable from, and solvable back to, the solved board.
///
/// # Examples
///
/// ```
/// use tileslide_generator::{PuzzleSeed, ShuffleGenerator};
///
/// let generator = ShuffleGenerator::new(4)?.with_moves(60);
/// let seed = PuzzleSeed::from_phrase("example");
/// let puzzle = generator.generate_with_seed(seed);
///
/// assert_eq!(puzzle.scramble.len(), 60);
/// assert_eq!(generator.generate_with_seed(seed), puzzle);
/// assert!(puzzle.board.is_solvable());
/// # Ok::<(), tileslide_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleGenerator {
    solved: Board,
    moves: usize,
}

impl ShuffleGenerator {
    /// Board size shown when a session starts.
    pub const STARTUP_SIZE: u8 = 3;
    /// Scramble length applied when a session starts.
    pub const STARTUP_MOVES: usize = 30;
    /// Scramble length of a quick reshuffle.
    pub const QUICK_MOVES: usize = 100;
    /// Scramble length per unit of side length for a fresh random board.
    pub const RANDOM_MOVES_PER_SIDE: usize = 50;
    /// Scramble length per unit of side length after a resize.
    pub const RESIZE_MOVES_PER_SIDE: usize = 20;

    /// Creates a generator for `size`×`size` boards using the random-board
    /// scramble length.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `size` is outside
    /// [`Board::MIN_SIZE`]`..=`[`Board::MAX_SIZE`].
    pub fn new(size: u8) -> Result<Self, BoardError> {
        Ok(Self {
            solved: Board::solved(size)?,
            moves: Self::random_moves(size),
        })
    }

    /// Creates a generator for boards the size of `board`.
    #[must_use]
    pub fn for_board(board: &Board) -> Self {
        Self {
            solved: board.goal(),
            moves: Self::random_moves(board.size()),
        }
    }

    /// Returns the scramble length for a fresh random board of `size`.
    #[must_use]
    pub fn random_moves(size: u8) -> usize {
        usize::from(size) * Self::RANDOM_MOVES_PER_SIDE
    }

    /// Returns the scramble length applied after resizing to `size`.
    #[must_use]
    pub fn resize_moves(size: u8) -> usize {
        usize::from(size) * Self::RESIZE_MOVES_PER_SIDE
    }

    /// Sets the number of random blank moves.
    #[must_use]
    pub fn with_moves(mut self, moves: usize) -> Self {
        self.moves = moves;
        self
    }

    /// Returns the board size.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.solved.size()
    }

    /// Returns the number of random blank moves.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Generates a puzzle from a fresh random seed.
    #[must_use]
    pub fn generate(&self) -> GeneratedPuzzle {
        self.generate_with_seed(PuzzleSeed::random())
    }

    /// Generates the puzzle determined by `seed`.
    #[must_use]
    pub fn generate_with_seed(&self, seed: PuzzleSeed) -> GeneratedPuzzle {
        let mut rng = Pcg64::from_seed(*seed.as_bytes());
        let mut board = self.solved.clone();
        let mut scramble = Vec::with_capacity(self.moves);
        for _ in 0..self.moves {
            let legal = board.legal_moves();
            let mv = legal[rng.random_range(0..legal.len())];
            if board.slide(mv).is_ok() {
                scramble.push(mv);
            }
        }
        log::debug!(
            "scrambled {size}x{size} board with {} moves from seed {seed}",
            scramble.len(),
            size = self.size()
        );
        GeneratedPuzzle {
            seed,
            board,
            scramble,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_default_lengths() {
        assert_eq!(ShuffleGenerator::new(4).unwrap().moves(), 200);
        assert_eq!(ShuffleGenerator::random_moves(3), 150);
        assert_eq!(ShuffleGenerator::resize_moves(5), 100);
        let startup = ShuffleGenerator::new(ShuffleGenerator::STARTUP_SIZE)
            .unwrap()
            .with_moves(ShuffleGenerator::STARTUP_MOVES);
        assert_eq!((startup.size(), startup.moves()), (3, 30));
    }

    #[test]
    fn test_for_board_matches_size() {
        let board: Board = "1,2,3,4,5,6,7,0,8".parse().unwrap();
        let generator = ShuffleGenerator::for_board(&board);
        assert_eq!(generator, ShuffleGenerator::new(3).unwrap());
    }

    #[test]
    fn test_rejects_unsupported_size() {
        assert!(ShuffleGenerator::new(1).is_err());
        assert!(ShuffleGenerator::new(9).is_err());
    }

    #[test]
    fn test_zero_moves_is_solved() {
        let puzzle = ShuffleGenerator::new(3)
            .unwrap()
            .with_moves(0)
            .generate();
        assert!(puzzle.board.is_solved());
        assert!(puzzle.scramble.is_empty());
    }

    #[test]
    fn test_seed_determines_puzzle() {
        let generator = ShuffleGenerator::new(5).unwrap();
        let a = generator.generate_with_seed(PuzzleSeed::from_phrase("a"));
        let b = generator.generate_with_seed(PuzzleSeed::from_phrase("a"));
        let c = generator.generate_with_seed(PuzzleSeed::from_phrase("b"));
        assert_eq!(a, b);
        assert_ne!(a.scramble, c.scramble);
    }

    proptest! {
        #[test]
        fn test_scramble_replays_and_reverses(
            size in Board::MIN_SIZE..=Board::MAX_SIZE,
            moves in 0..300_usize,
            seed in any::<[u8; 32]>(),
        ) {
            let generator = ShuffleGenerator::new(size).unwrap().with_moves(moves);
            let puzzle = generator.generate_with_seed(PuzzleSeed::from_bytes(seed));
            prop_assert_eq!(puzzle.scramble.len(), moves);

            let solved = Board::solved(size).unwrap();
            prop_assert_eq!(&solved.replay(puzzle.scramble.iter().copied()).unwrap(), &puzzle.board);

            let undo = puzzle.scramble.iter().rev().map(|mv| mv.opposite());
            prop_assert!(puzzle.board.replay(undo).unwrap().is_solved());
            prop_assert!(puzzle.board.is_solvable());
        }
    }
}
