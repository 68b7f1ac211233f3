//! Error types for board construction and moves.

use crate::{Move, Position};

/// A board that does not describe a valid puzzle.
///
/// A valid `size`×`size` board holds every value in `0..size²` exactly once,
/// with `0` standing for the blank.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The side length is outside the supported range.
    #[display("unsupported board size {size}, expected {min}..={max}")]
    UnsupportedSize {
        /// Requested side length.
        size: usize,
        /// Smallest supported side length.
        min: u8,
        /// Largest supported side length.
        max: u8,
    },
    /// The number of tiles does not match `size²`.
    #[display("expected {expected} tiles, found {actual}")]
    TileCountMismatch {
        /// Tile count required by the size.
        expected: usize,
        /// Tile count supplied.
        actual: usize,
    },
    /// A tile value is not below `size²`.
    #[display("tile {value} is out of range, expected 0..={max}")]
    TileOutOfRange {
        /// Offending value.
        value: u8,
        /// Largest allowed value.
        max: u8,
    },
    /// A tile value appears more than once.
    #[display("tile {value} appears more than once")]
    DuplicateTile {
        /// Repeated value.
        value: u8,
    },
    /// A token in a textual board is not a tile number.
    #[display("invalid tile number {token:?}")]
    InvalidNumber {
        /// Offending token.
        token: String,
    },
    /// A textual board does not contain a square number of tiles.
    #[display("{count} numbers do not form a square board")]
    NotSquare {
        /// Number of tiles found.
        count: usize,
    },
    /// The rows of a board have different lengths.
    #[display("row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        actual: usize,
    },
}

/// A slide that would move the blank off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The blank is on the edge in the requested direction.
    #[display("cannot move the blank {} from {blank}", mv.name())]
    OutOfBounds {
        /// Requested move.
        mv: Move,
        /// Blank position at the time of the request.
        blank: Position,
    },
}

/// A token that is not a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid move token {token:?}")]
pub struct ParseMoveError {
    /// Offending token.
    pub token: String,
}
