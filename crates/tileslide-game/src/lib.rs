//! Interactive play session and board editor for sliding-tile puzzles.
//!
//! - [`Game`] holds the live board of a session: the move counter, the selected
//!   cell, scrambling, and step-by-step playback of a solver's solution.
//! - [`Editor`] holds a board under construction. Cells may be temporarily
//!   invalid; [`Editor::issues`] reports what is wrong and [`Editor::finish`]
//!   yields a [`Board`](tileslide_core::Board) once the cells form a puzzle.
//!
//! # Examples
//!
//! ```
//! use tileslide_core::{Board, Position};
//! use tileslide_game::Game;
//!
//! let mut game = Game::new("1,2,3,4,5,6,7,0,8".parse::<Board>()?);
//! game.slide_tile(Position::new(2, 2))?;
//! assert!(game.is_solved());
//! assert_eq!(game.move_count(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{editor::*, error::*, game::*};

mod editor;
mod error;
mod game;
