//! Core data structures for sliding-tile puzzles.
//!
//! This crate provides the value types shared by the solver, generator, and game
//! crates: the board state of an N×N puzzle, cell coordinates, and the four move
//! tokens that slide the blank around.
//!
//! # Overview
//!
//! - [`board`]: [`Board`], an immutable-by-default snapshot of tile positions
//!   together with its blank position, plus the move generator
//!   ([`Board::legal_moves`], [`Board::successors`]) and [`apply_move`].
//! - [`position`]: [`Position`], a `(row, col)` coordinate on a board.
//! - [`movement`]: [`Move`], the direction the blank moves in one slide.
//! - [`error`]: [`BoardError`] for malformed boards and [`MoveError`] for
//!   slides that would leave the grid.
//!
//! # Examples
//!
//! ```
//! use tileslide_core::{Board, Move};
//!
//! let board: Board = "1,2,3,4,5,6,7,0,8".parse()?;
//! assert!(!board.is_solved());
//!
//! // The blank moves right, sliding tile 8 to the left.
//! let next = tileslide_core::apply_move(&board, Move::Right)?;
//! assert!(next.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod board;
pub mod error;
pub mod movement;
pub mod position;

pub use self::{
    board::{Board, BoardKey, apply_move, parse_cells},
    error::{BoardError, MoveError, ParseMoveError},
    movement::{Move, parse_moves},
    position::Position,
};
