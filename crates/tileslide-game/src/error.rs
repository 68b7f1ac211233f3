use tileslide_core::{MoveError, Position};

/// Errors that can occur while playing or editing a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The position lies outside the board.
    #[display("{pos} is outside the board")]
    OutsideBoard {
        /// Requested position.
        pos: Position,
    },
    /// The blank itself was chosen as the tile to slide.
    #[display("{pos} is the blank")]
    BlankTile {
        /// Requested position.
        pos: Position,
    },
    /// The tile does not touch the blank.
    #[display("tile at {pos} is not next to the blank at {blank}")]
    NotAdjacent {
        /// Requested position.
        pos: Position,
        /// Blank position at the time of the request.
        blank: Position,
    },
    /// The blank cannot move in the requested direction.
    #[display("{_0}")]
    #[from]
    InvalidMove(MoveError),
    /// No solution is attached to the session.
    #[display("no solution to step through")]
    NoSolution,
}
