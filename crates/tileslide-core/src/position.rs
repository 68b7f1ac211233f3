//! Board coordinates.

use std::fmt::{self, Display};

use crate::Move;

/// A cell coordinate on an N×N board.
///
/// Rows and columns are counted from the top-left corner starting at 0.
/// A `Position` carries no board size; bounds are checked against a size by
/// [`Position::neighbor`] and by the [`Board`](crate::Board) accessors.
///
/// # Examples
///
/// ```
/// use tileslide_core::{Move, Position};
///
/// let pos = Position::new(1, 2);
/// assert_eq!(pos.row(), 1);
/// assert_eq!(pos.col(), 2);
///
/// // Stepping outside a 3×3 board yields `None`.
/// assert_eq!(pos.neighbor(Move::Right, 3), None);
/// assert_eq!(pos.neighbor(Move::Up, 3), Some(Position::new(0, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Returns the row (0-based, top to bottom).
    #[must_use]
    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-based, left to right).
    #[must_use]
    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[must_use]
    #[inline]
    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn from_index(index: usize, size: u8) -> Self {
        let size = usize::from(size);
        Self::new((index / size) as u8, (index % size) as u8)
    }

    #[must_use]
    #[inline]
    pub(crate) fn to_index(self, size: u8) -> usize {
        usize::from(self.row) * usize::from(size) + usize::from(self.col)
    }

    /// Returns `true` if the position lies inside a `size`×`size` board.
    #[must_use]
    #[inline]
    pub const fn is_within(self, size: u8) -> bool {
        self.row < size && self.col < size
    }

    /// Returns the Manhattan distance between two positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::Position;
    ///
    /// assert_eq!(Position::new(0, 0).manhattan_distance(Position::new(2, 1)), 3);
    /// ```
    #[must_use]
    #[inline]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }

    /// Returns the position one step away in the direction of `mv`, if it stays on a
    /// `size`×`size` board.
    #[must_use]
    pub fn neighbor(self, mv: Move, size: u8) -> Option<Self> {
        let (dr, dc) = mv.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Self::new(row, col);
        next.is_within(size).then_some(next)
    }

    /// Returns the move that takes `self` one step onto `other`.
    ///
    /// Returns `None` unless the two positions are orthogonally adjacent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tileslide_core::{Move, Position};
    ///
    /// let blank = Position::new(1, 1);
    /// assert_eq!(blank.direction_to(Position::new(0, 1)), Some(Move::Up));
    /// assert_eq!(blank.direction_to(Position::new(2, 2)), None);
    /// ```
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Move> {
        Move::ALL.into_iter().find(|&mv| {
            let (dr, dc) = mv.offset();
            self.row.checked_add_signed(dr) == Some(other.row)
                && self.col.checked_add_signed(dc) == Some(other.col)
        })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for size in 2..=8 {
            for index in 0..usize::from(size) * usize::from(size) {
                assert_eq!(Position::from_index(index, size).to_index(size), index);
            }
        }
        assert_eq!(Position::from_index(5, 3), Position::new(1, 2));
    }

    #[test]
    fn test_neighbor_respects_bounds() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.neighbor(Move::Up, 3), None);
        assert_eq!(corner.neighbor(Move::Left, 3), None);
        assert_eq!(corner.neighbor(Move::Down, 3), Some(Position::new(1, 0)));
        assert_eq!(corner.neighbor(Move::Right, 3), Some(Position::new(0, 1)));

        let far = Position::new(2, 2);
        assert_eq!(far.neighbor(Move::Down, 3), None);
        assert_eq!(far.neighbor(Move::Right, 3), None);
        assert_eq!(far.neighbor(Move::Down, 4), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_direction_to() {
        let center = Position::new(1, 1);
        for mv in Move::ALL {
            let next = center.neighbor(mv, 3).expect("center has four neighbors");
            assert_eq!(center.direction_to(next), Some(mv));
        }
        assert_eq!(center.direction_to(center), None);
        assert_eq!(center.direction_to(Position::new(0, 0)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 4).to_string(), "(3, 4)");
    }
}
