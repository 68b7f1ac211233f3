use tileslide_core::BoardError;

use crate::SearchHandle;

/// Errors that can occur when starting or controlling a search.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolverError {
    /// The start board is not a valid puzzle.
    #[display("invalid board: {_0}")]
    #[from]
    InvalidBoard(BoardError),
    /// A search is already running on the host.
    #[display("search {active} is still running")]
    AlreadySearching {
        /// Handle of the running search.
        active: SearchHandle,
    },
    /// The handle does not name the running search.
    #[display("search {handle} is not running")]
    UnknownHandle {
        /// The rejected handle.
        handle: SearchHandle,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_converts_to_invalid_board() {
        let err = SolverError::from(BoardError::DuplicateTile { value: 1 });
        assert_eq!(
            err,
            SolverError::InvalidBoard(BoardError::DuplicateTile { value: 1 })
        );
        assert_eq!(err.to_string(), "invalid board: tile 1 appears more than once");
    }
}
