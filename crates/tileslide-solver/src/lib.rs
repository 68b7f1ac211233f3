//! State-space search for sliding-tile puzzles.
//!
//! This crate finds move sequences that bring a [`Board`](tileslide_core::Board)
//! to the solved configuration. Two strategies share one search driver:
//!
//! - [`Strategy::AStar`]: best-first on `g + h`, where `h` is the
//!   [`manhattan_distance`] of the tiles from their goal cells.
//! - [`Strategy::BreadthFirst`]: expands states in discovery order and returns
//!   a shortest solution.
//!
//! # Overview
//!
//! - [`Search`] is a resumable state machine. It owns the frontier, the visited
//!   set and the node arena, expands one node per [`Search::step`], and stops
//!   as solved, exhausted (frontier empty or node cap hit) or aborted.
//! - [`SearchHost`] runs one search at a time in slices and reports
//!   [`SearchEvent`]s, for callers that poll from an event loop.
//! - [`SearchTask`] wraps a search as a [`Future`](std::future::Future) that
//!   yields after every slice.
//! - [`PriorityQueue`] is the binary heap behind the A* frontier.
//!
//! # Examples
//!
//! ```
//! use tileslide_core::{Board, Move};
//! use tileslide_solver::{SearchOutcome, Strategy, solve};
//!
//! let board: Board = "1,2,3,4,5,6,7,0,8".parse()?;
//! match solve(&board, Strategy::AStar) {
//!     SearchOutcome::Solved(solution) => assert_eq!(solution.moves(), [Move::Right]),
//!     other => panic!("unexpected outcome: {other}"),
//! }
//! # Ok::<(), tileslide_core::BoardError>(())
//! ```

pub use self::{
    cancel::*, error::*, frontier::*, heuristic::*, host::*, node::*, priority_queue::*,
    search::*, task::*,
};

mod cancel;
mod error;
mod frontier;
mod heuristic;
mod host;
mod node;
mod priority_queue;
mod search;
mod task;
