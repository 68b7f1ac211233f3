use std::{
    fmt::{self, Display},
    str::FromStr,
};

use tileslide_core::{Board, BoardError, Position, parse_cells};

use crate::GameError;

/// How serious a [`ValidationIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Severity {
    /// The board may be fine but deserves a second look.
    #[display("warning")]
    Warning,
    /// The cells do not form a board.
    #[display("error")]
    Error,
}

/// A problem found in the cells of an [`Editor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Values that appear in more than one cell, in ascending order.
    DuplicateTiles {
        /// Repeated values.
        values: Vec<u8>,
    },
    /// Values of `0..size²` that appear in no cell, in ascending order.
    MissingTiles {
        /// Absent values.
        values: Vec<u8>,
    },
    /// Values not below `size²`, in ascending order.
    OutOfRange {
        /// Offending values.
        values: Vec<u8>,
        /// Largest allowed value.
        max: u8,
    },
    /// The cells form a board whose parity rules out reaching the goal.
    MaybeUnsolvable,
}

impl ValidationIssue {
    /// Returns how serious the issue is.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::DuplicateTiles { .. } | Self::MissingTiles { .. } | Self::OutOfRange { .. } => {
                Severity::Error
            }
            Self::MaybeUnsolvable => Severity::Warning,
        }
    }

    /// Returns `true` if the issue prevents the cells from forming a board.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity().is_error()
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, values: &[u8]) -> fmt::Result {
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            Ok(())
        }

        match self {
            Self::DuplicateTiles { values } => {
                f.write_str("duplicate numbers: ")?;
                list(f, values)
            }
            Self::MissingTiles { values } => {
                f.write_str("missing numbers: ")?;
                list(f, values)
            }
            Self::OutOfRange { values, max } => {
                write!(f, "numbers above {max}: ")?;
                list(f, values)
            }
            Self::MaybeUnsolvable => f.write_str("this configuration may not be solvable"),
        }
    }
}

/// A board under construction.
///
/// Unlike [`Board`], the cells of an editor may be temporarily invalid: values
/// may repeat, be missing, or be out of range. The editor keeps track of a
/// blank cell so that the result can be played once it is valid.
///
/// # Examples
///
/// ```
/// use tileslide_core::Position;
/// use tileslide_game::{Editor, ValidationIssue};
///
/// let mut editor = Editor::new(3)?;
/// editor.set_tile(Position::new(0, 0), 2)?;
/// assert_eq!(
///     editor.issues(),
///     [
///         ValidationIssue::DuplicateTiles { values: vec![2] },
///         ValidationIssue::MissingTiles { values: vec![1] },
///     ]
/// );
///
/// editor.set_tile(Position::new(0, 1), 1)?;
/// assert_eq!(editor.issues(), [ValidationIssue::MaybeUnsolvable]);
/// let board = editor.finish()?;
/// assert!(!board.is_solvable());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    size: u8,
    cells: Vec<u8>,
    blank: Position,
}

impl Editor {
    /// Starts editing a solved board of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `size` is out of range.
    pub fn new(size: u8) -> Result<Self, BoardError> {
        Ok(Self::from_board(&Board::solved(size)?))
    }

    /// Starts editing a copy of `board`.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            cells: board.tiles().to_vec(),
            blank: board.blank(),
        }
    }

    /// Starts editing a board of `size` with every cell blank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `size` is out of range.
    pub fn empty(size: u8) -> Result<Self, BoardError> {
        let mut editor = Self::new(size)?;
        editor.clear();
        Ok(editor)
    }

    /// Returns the side length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns the cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Returns the cell treated as the blank.
    #[must_use]
    pub fn blank(&self) -> Position {
        self.blank
    }

    /// Returns the value at `pos`, or `None` if it is outside the board.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<u8> {
        self.index_of(pos).map(|index| self.cells[index])
    }

    /// Writes `value` into the cell at `pos`.
    ///
    /// Writing `0` makes the cell the blank. Writing a number over the blank
    /// moves the blank to the first remaining `0` in row-major order, or to
    /// the last cell (which is then set to `0`) if none remains.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutsideBoard`] for a position off the board.
    pub fn set_tile(&mut self, pos: Position, value: u8) -> Result<(), GameError> {
        let index = self.index_of(pos).ok_or(GameError::OutsideBoard { pos })?;
        self.cells[index] = value;
        if value == Board::BLANK {
            self.blank = pos;
        } else if pos == self.blank {
            self.relocate_blank();
        }
        Ok(())
    }

    /// Sets every cell to `0` and puts the blank in the top-left corner.
    pub fn clear(&mut self) {
        self.cells.fill(Board::BLANK);
        self.blank = Position::new(0, 0);
    }

    /// Reports what keeps the cells from forming a solvable board.
    ///
    /// Errors come first: duplicates, then missing values, then out-of-range
    /// values. The unsolvable warning is only raised when there are no errors.
    #[must_use]
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let len = self.cells.len();
        let mut counts = [0_usize; 256];
        for &value in &self.cells {
            counts[usize::from(value)] += 1;
        }
        let values_where = |pred: &dyn Fn(usize, usize) -> bool| {
            (0..=u8::MAX)
                .zip(counts)
                .filter(|&(value, count)| pred(usize::from(value), count))
                .map(|(value, _)| value)
                .collect::<Vec<_>>()
        };
        let duplicates = values_where(&|_, count| count > 1);
        let missing = values_where(&|value, count| value < len && count == 0);
        let out_of_range = values_where(&|value, count| value >= len && count > 0);

        let mut issues = Vec::new();
        if !duplicates.is_empty() {
            issues.push(ValidationIssue::DuplicateTiles { values: duplicates });
        }
        if !missing.is_empty() {
            issues.push(ValidationIssue::MissingTiles { values: missing });
        }
        if !out_of_range.is_empty() {
            let max = u8::try_from(len - 1).unwrap_or(u8::MAX);
            issues.push(ValidationIssue::OutOfRange {
                values: out_of_range,
                max,
            });
        }
        if issues.is_empty() && self.finish().is_ok_and(|board| !board.is_solvable()) {
            issues.push(ValidationIssue::MaybeUnsolvable);
        }
        issues
    }

    /// Returns `true` if the cells form a board, solvable or not.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.issues().iter().any(ValidationIssue::is_error)
    }

    /// Builds the board described by the cells.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the cells do not hold every value of
    /// `0..size²` exactly once.
    pub fn finish(&self) -> Result<Board, BoardError> {
        Board::from_tiles(self.size, self.cells.clone())
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        pos.is_within(self.size)
            .then(|| usize::from(pos.row()) * usize::from(self.size) + usize::from(pos.col()))
    }

    fn position_at(&self, index: usize) -> Position {
        let size = usize::from(self.size);
        let row = u8::try_from(index / size).unwrap_or(u8::MAX);
        let col = u8::try_from(index % size).unwrap_or(u8::MAX);
        Position::new(row, col)
    }

    fn relocate_blank(&mut self) {
        let index = match self.cells.iter().position(|&value| value == Board::BLANK) {
            Some(index) => index,
            None => {
                let last = self.cells.len() - 1;
                self.cells[last] = Board::BLANK;
                last
            }
        };
        self.blank = self.position_at(index);
    }
}

impl From<&Board> for Editor {
    fn from(board: &Board) -> Self {
        Self::from_board(board)
    }
}

impl FromStr for Editor {
    type Err = BoardError;

    /// Parses cells the way [`Board`] does, without checking that they form a
    /// valid board.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, cells) = parse_cells(s)?;
        let mut editor = Self {
            size,
            cells,
            blank: Position::new(0, 0),
        };
        editor.relocate_blank();
        Ok(editor)
    }
}

impl Display for Editor {
    /// Formats the cells like a [`Board`]: comma separated, or as a grid with
    /// the alternate flag.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.cells.iter().max().map_or(1, |max| max.to_string().len());
        for (i, value) in self.cells.iter().enumerate() {
            if f.alternate() {
                if i > 0 {
                    let sep = if i % usize::from(self.size) == 0 { "\n" } else { " " };
                    f.write_str(sep)?;
                }
                write!(f, "{value:>width$}")?;
            } else {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_solved_board() {
        let editor = Editor::new(3).unwrap();
        assert_eq!(editor.cells(), [1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(editor.blank(), Position::new(2, 2));
        assert!(editor.issues().is_empty());
        assert!(editor.finish().unwrap().is_solved());
        assert!(Editor::new(9).is_err());
    }

    #[test]
    fn test_set_zero_moves_blank() {
        let mut editor = Editor::new(3).unwrap();
        editor.set_tile(Position::new(0, 0), 0).unwrap();
        assert_eq!(editor.blank(), Position::new(0, 0));
        assert_eq!(editor.cell(Position::new(0, 0)), Some(0));
        // the old blank cell still holds 0
        assert_eq!(editor.cell(Position::new(2, 2)), Some(0));
    }

    #[test]
    fn test_overwrite_blank_finds_first_zero() {
        let mut editor = Editor::empty(2).unwrap();
        editor.set_tile(Position::new(0, 0), 3).unwrap();
        assert_eq!(editor.blank(), Position::new(0, 1));
        assert_eq!(editor.cells(), [3, 0, 0, 0]);
    }

    #[test]
    fn test_overwrite_last_blank_falls_back_to_last_cell() {
        let mut editor: Editor = "1,2,3,0".parse().unwrap();
        assert_eq!(editor.blank(), Position::new(1, 1));
        editor.set_tile(Position::new(1, 1), 2).unwrap();
        assert_eq!(editor.cells(), [1, 2, 3, 0]);
        assert_eq!(editor.blank(), Position::new(1, 1));
    }

    #[test]
    fn test_overwrite_other_cell_keeps_blank() {
        let mut editor = Editor::new(3).unwrap();
        editor.set_tile(Position::new(1, 1), 9).unwrap();
        assert_eq!(editor.blank(), Position::new(2, 2));
        assert_eq!(
            editor.set_tile(Position::new(3, 0), 1),
            Err(GameError::OutsideBoard {
                pos: Position::new(3, 0)
            })
        );
    }

    #[test]
    fn test_clear() {
        let mut editor = Editor::new(4).unwrap();
        editor.clear();
        assert!(editor.cells().iter().all(|&value| value == 0));
        assert_eq!(editor.blank(), Position::new(0, 0));
        assert_eq!(
            editor.issues()[0],
            ValidationIssue::DuplicateTiles { values: vec![0] }
        );
        assert!(!editor.is_valid());
    }

    #[test]
    fn test_issues_report_every_problem() {
        let editor: Editor = "1,1,9,0,4,5,6,7,12".parse().unwrap();
        assert_eq!(
            editor.issues(),
            [
                ValidationIssue::DuplicateTiles { values: vec![1] },
                ValidationIssue::MissingTiles {
                    values: vec![2, 3, 8]
                },
                ValidationIssue::OutOfRange {
                    values: vec![9, 12],
                    max: 8
                },
            ]
        );
        assert!(editor.finish().is_err());
    }

    #[test]
    fn test_out_of_range_repeats_are_duplicates() {
        let editor: Editor = "9,9,0,1".parse().unwrap();
        let issues = editor.issues();
        assert_eq!(issues[0], ValidationIssue::DuplicateTiles { values: vec![9] });
        assert_eq!(issues[0].to_string(), "duplicate numbers: 9");
    }

    #[test]
    fn test_parity_warning_any_size() {
        let odd: Editor = "2,1,3,4,5,6,7,8,0".parse().unwrap();
        assert_eq!(odd.issues(), [ValidationIssue::MaybeUnsolvable]);
        assert!(odd.is_valid());
        assert_eq!(ValidationIssue::MaybeUnsolvable.severity(), Severity::Warning);

        let fifteen: Editor = "1,2,3,4,5,6,7,8,9,10,11,12,13,15,14,0".parse().unwrap();
        assert_eq!(fifteen.issues(), [ValidationIssue::MaybeUnsolvable]);

        let solvable: Editor = "1,2,3,4,5,6,7,8,9,10,11,12,13,14,0,15".parse().unwrap();
        assert!(solvable.issues().is_empty());
    }

    #[test]
    fn test_display() {
        let editor: Editor = "1,10,3,0".parse().unwrap();
        assert_eq!(editor.to_string(), "1,10,3,0");
        assert_eq!(format!("{editor:#}"), " 1 10\n 3  0");
        assert_eq!(
            ValidationIssue::MissingTiles { values: vec![2, 3] }.to_string(),
            "missing numbers: 2, 3"
        );
    }

    #[test]
    fn test_round_trip_through_board() {
        let board: Board = "4,1,2,0,5,3,7,8,6".parse().unwrap();
        let editor = Editor::from(&board);
        assert_eq!(editor.blank(), board.blank());
        assert_eq!(editor.finish().unwrap(), board);
    }
}
