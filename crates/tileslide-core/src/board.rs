//! Board state and move generation.

use std::{
    collections::HashSet,
    fmt::{self, Display},
    str::FromStr,
};

use tinyvec::ArrayVec;

use crate::{BoardError, Move, MoveError, Position};

/// A snapshot of an N×N sliding-tile puzzle.
///
/// Tiles are stored row-major; the value `0` is the blank. A `Board` always
/// satisfies the puzzle invariant: every value in `0..size²` appears exactly once,
/// and the cached blank position points at the `0`. Constructors reject anything
/// else with [`BoardError`].
///
/// Boards are plain values. [`Board::apply_move`] and [`Board::successors`]
/// produce new boards; only [`Board::slide`] mutates in place, for callers that
/// keep a single live board.
///
/// # Examples
///
/// ```
/// use tileslide_core::{Board, Move, Position};
///
/// let mut board = Board::solved(3)?;
/// assert_eq!(board.blank(), Position::new(2, 2));
///
/// board.slide(Move::Up)?;
/// assert_eq!(board.tile_at(Position::new(2, 2)), Some(6));
/// assert!(!board.is_solved());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    tiles: Box<[u8]>,
    blank: Position,
}

/// A value-equal, hashable representation of a board used for set membership.
///
/// Two boards have equal keys exactly when they hold the same tiles in the same
/// cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardKey(Box<[u8]>);

impl BoardKey {
    /// Returns the row-major tile sequence the key was built from.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl Board {
    /// Smallest supported side length.
    pub const MIN_SIZE: u8 = 2;
    /// Largest supported side length.
    pub const MAX_SIZE: u8 = 8;
    /// The tile value that marks the blank.
    pub const BLANK: u8 = 0;

    /// Returns the solved board of the given size.
    ///
    /// Tiles `1..size²` fill the board row by row and the blank sits in the
    /// bottom-right corner.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `size` is outside
    /// [`Board::MIN_SIZE`]`..=`[`Board::MAX_SIZE`].
    pub fn solved(size: u8) -> Result<Self, BoardError> {
        check_size(usize::from(size))?;
        Ok(Self::solved_unchecked(size))
    }

    /// Returns the solved board of the same size as `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::Board;
    ///
    /// let board: Board = "3,1,0,2".parse()?;
    /// assert_eq!(board.goal(), Board::solved(2)?);
    /// # Ok::<(), tileslide_core::BoardError>(())
    /// ```
    #[must_use]
    pub fn goal(&self) -> Self {
        Self::solved_unchecked(self.size)
    }

    fn solved_unchecked(size: u8) -> Self {
        let cells = usize::from(size) * usize::from(size);
        let tiles = (1..cells)
            .map(|value| u8::try_from(value).unwrap_or(u8::MAX))
            .chain([Self::BLANK])
            .collect();
        Self {
            size,
            tiles,
            blank: Position::new(size - 1, size - 1),
        }
    }

    /// Builds a board from a row-major tile sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the size is unsupported, the tile count is not
    /// `size²`, or the values are not exactly `0..size²`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::{Board, BoardError};
    ///
    /// let board = Board::from_tiles(2, vec![1, 2, 0, 3])?;
    /// assert_eq!(board.blank().row(), 1);
    ///
    /// assert_eq!(
    ///     Board::from_tiles(2, vec![1, 1, 0, 3]),
    ///     Err(BoardError::DuplicateTile { value: 1 })
    /// );
    /// # Ok::<(), BoardError>(())
    /// ```
    pub fn from_tiles(size: u8, tiles: Vec<u8>) -> Result<Self, BoardError> {
        check_size(usize::from(size))?;
        let cells = usize::from(size) * usize::from(size);
        if tiles.len() != cells {
            return Err(BoardError::TileCountMismatch {
                expected: cells,
                actual: tiles.len(),
            });
        }

        let max = u8::try_from(cells - 1).unwrap_or(u8::MAX);
        let mut seen = HashSet::with_capacity(cells);
        let mut blank = None;
        for (index, &value) in tiles.iter().enumerate() {
            if value > max {
                return Err(BoardError::TileOutOfRange { value, max });
            }
            if !seen.insert(value) {
                return Err(BoardError::DuplicateTile { value });
            }
            if value == Self::BLANK {
                blank = Some(Position::from_index(index, size));
            }
        }
        // `cells` distinct values below `cells` always include the blank.
        let blank = blank.ok_or(BoardError::TileCountMismatch {
            expected: cells,
            actual: seen.len(),
        })?;

        Ok(Self {
            size,
            tiles: tiles.into_boxed_slice(),
            blank,
        })
    }

    /// Builds a board from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RaggedRow`] if the rows differ in length from the row
    /// count, and any error of [`Board::from_tiles`].
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[u8]>,
    {
        let size = rows.len();
        check_size(size)?;
        let mut tiles = Vec::with_capacity(size * size);
        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != size {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: size,
                    actual: cells.len(),
                });
            }
            tiles.extend_from_slice(cells);
        }
        let size = u8::try_from(size).unwrap_or(u8::MAX);
        Self::from_tiles(size, tiles)
    }

    /// Returns the side length.
    #[must_use]
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Returns the row-major tile sequence.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Returns the position of the blank.
    #[must_use]
    #[inline]
    pub fn blank(&self) -> Position {
        self.blank
    }

    /// Returns an iterator over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.tiles.chunks_exact(usize::from(self.size))
    }

    /// Returns the tile at `pos`, or `None` if `pos` is off the board.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<u8> {
        pos.is_within(self.size)
            .then(|| self.tiles[pos.to_index(self.size)])
    }

    /// Returns the position currently holding `value`.
    #[must_use]
    pub fn position_of(&self, value: u8) -> Option<Position> {
        self.tiles
            .iter()
            .position(|&tile| tile == value)
            .map(|index| Position::from_index(index, self.size))
    }

    /// Returns where `value` sits on the solved board of this size.
    ///
    /// Tile `v` belongs at row `(v - 1) / size`, column `(v - 1) % size`; the blank
    /// belongs in the bottom-right corner.
    #[must_use]
    pub fn goal_position(&self, value: u8) -> Position {
        let cells = usize::from(self.size) * usize::from(self.size);
        let index = match value {
            Self::BLANK => cells - 1,
            value => usize::from(value) - 1,
        };
        Position::from_index(index, self.size)
    }

    /// Returns `true` if the board is in the solved configuration.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles.iter().enumerate().all(|(index, &tile)| {
            if index == last {
                tile == Self::BLANK
            } else {
                usize::from(tile) == index + 1
            }
        })
    }

    /// Returns the canonical key of this board.
    #[must_use]
    pub fn key(&self) -> BoardKey {
        BoardKey(self.tiles.clone())
    }

    /// Returns `true` if `mv` keeps the blank on the board.
    #[must_use]
    pub fn can_move(&self, mv: Move) -> bool {
        self.blank.neighbor(mv, self.size).is_some()
    }

    /// Returns the legal moves from this board, in [`Move::ALL`] order.
    ///
    /// A board has two legal moves with the blank in a corner, three on an edge,
    /// and four elsewhere.
    #[must_use]
    pub fn legal_moves(&self) -> ArrayVec<[Move; 4]> {
        Move::ALL
            .into_iter()
            .filter(|&mv| self.can_move(mv))
            .collect()
    }

    /// Slides the blank in place.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] and leaves the board untouched if the
    /// blank is on the edge in the direction of `mv`.
    pub fn slide(&mut self, mv: Move) -> Result<(), MoveError> {
        let target = self
            .blank
            .neighbor(mv, self.size)
            .ok_or(MoveError::OutOfBounds {
                mv,
                blank: self.blank,
            })?;
        self.tiles
            .swap(self.blank.to_index(self.size), target.to_index(self.size));
        self.blank = target;
        Ok(())
    }

    /// Returns the board reached by sliding the blank once.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if the blank is on the edge in the
    /// direction of `mv`.
    pub fn apply_move(&self, mv: Move) -> Result<Self, MoveError> {
        let mut next = self.clone();
        next.slide(mv)?;
        Ok(next)
    }

    /// Returns every board one slide away, paired with the move that reaches it.
    ///
    /// Each successor differs from `self` by a single swap between the blank and
    /// one of its orthogonal neighbours.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::{Board, Move};
    ///
    /// let board = Board::solved(3)?;
    /// let moves: Vec<_> = board.successors().map(|(mv, _)| mv).collect();
    /// assert_eq!(moves, [Move::Up, Move::Left]);
    /// # Ok::<(), tileslide_core::BoardError>(())
    /// ```
    pub fn successors(&self) -> impl Iterator<Item = (Move, Self)> + '_ {
        self.legal_moves()
            .into_iter()
            .filter_map(|mv| self.apply_move(mv).ok().map(|next| (mv, next)))
    }

    /// Replays a move sequence and returns the final board.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] of the first move that leaves the board.
    pub fn replay<I>(&self, moves: I) -> Result<Self, MoveError>
    where
        I: IntoIterator<Item = Move>,
    {
        let mut board = self.clone();
        for mv in moves {
            board.slide(mv)?;
        }
        Ok(board)
    }

    /// Counts pairs of non-blank tiles that appear in the wrong order, reading the
    /// board row by row.
    #[must_use]
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self
            .tiles
            .iter()
            .copied()
            .filter(|&tile| tile != Self::BLANK)
            .collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| a > b).count())
            .sum()
    }

    /// Returns `true` if the solved board is reachable from this one.
    ///
    /// On odd sizes the inversion count must be even. On even sizes the inversion
    /// count plus the blank's row counted from the bottom (starting at 1) must be
    /// odd.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversions();
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let row_from_bottom = usize::from(self.size - self.blank.row());
            (inversions + row_from_bottom) % 2 == 1
        }
    }
}

/// Returns the board reached by sliding the blank of `board` once.
///
/// This is the replay entry point for renderers stepping through a solution.
///
/// # Errors
///
/// Returns [`MoveError::OutOfBounds`] if the blank is on the edge in the
/// direction of `mv`.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board, MoveError> {
    board.apply_move(mv)
}

fn check_size(size: usize) -> Result<(), BoardError> {
    if (usize::from(Board::MIN_SIZE)..=usize::from(Board::MAX_SIZE)).contains(&size) {
        Ok(())
    } else {
        Err(BoardError::UnsupportedSize {
            size,
            min: Board::MIN_SIZE,
            max: Board::MAX_SIZE,
        })
    }
}

impl Display for Board {
    /// Formats the board as comma-separated tiles, or as a grid with `{:#}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let width = (self.tiles.len() - 1).to_string().len();
            for (y, row) in self.rows().enumerate() {
                if y != 0 {
                    writeln!(f)?;
                }
                for (x, &tile) in row.iter().enumerate() {
                    if x != 0 {
                        write!(f, " ")?;
                    }
                    if tile == Self::BLANK {
                        write!(f, "{:>width$}", ".")?;
                    } else {
                        write!(f, "{tile:>width$}")?;
                    }
                }
            }
            Ok(())
        } else {
            for (i, tile) in self.tiles.iter().enumerate() {
                if i != 0 {
                    write!(f, ",")?;
                }
                write!(f, "{tile}")?;
            }
            Ok(())
        }
    }
}

/// Splits text into a square grid of cell values without checking the puzzle
/// invariant.
///
/// Numbers may be separated by commas or whitespace. The side length is inferred
/// from the count, which must be the square of a supported size. Editors use this
/// to load boards that may still contain duplicates or gaps.
///
/// # Errors
///
/// Returns [`BoardError::InvalidNumber`] for a token that is not a number in
/// `0..=255`, [`BoardError::NotSquare`] if the count is not a perfect square, and
/// [`BoardError::UnsupportedSize`] if the side is out of range.
///
/// # Examples
///
/// ```
/// use tileslide_core::parse_cells;
///
/// let (size, cells) = parse_cells("1 1\n0 3")?;
/// assert_eq!(size, 2);
/// assert_eq!(cells, [1, 1, 0, 3]);
/// # Ok::<(), tileslide_core::BoardError>(())
/// ```
pub fn parse_cells(s: &str) -> Result<(u8, Vec<u8>), BoardError> {
    let cells = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u8>().map_err(|_| BoardError::InvalidNumber {
                token: token.to_owned(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let count = cells.len();
    let size = (0..=usize::from(Board::MAX_SIZE))
        .find(|side| side * side == count)
        .ok_or(BoardError::NotSquare { count })?;
    check_size(size)?;
    Ok((u8::try_from(size).unwrap_or(u8::MAX), cells))
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses numbers separated by commas or whitespace.
    ///
    /// The side length is inferred from the count, which must be a perfect square.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (size, tiles) = parse_cells(s)?;
        Self::from_tiles(size, tiles)
    }
}
