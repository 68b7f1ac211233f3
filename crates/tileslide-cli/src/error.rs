use std::io;

use tileslide_core::{BoardError, MoveError};
use tileslide_game::GameError;
use tileslide_solver::SolverError;

/// Errors that end a command.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub(crate) enum CliError {
    #[display("{_0}")]
    #[from]
    Board(BoardError),
    #[display("{_0}")]
    #[from]
    Move(MoveError),
    #[display("{_0}")]
    #[from]
    Game(GameError),
    #[display("{_0}")]
    #[from]
    Solver(SolverError),
    #[display("I/O error: {_0}")]
    #[from]
    Io(io::Error),
}
