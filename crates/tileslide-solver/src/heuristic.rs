use tileslide_core::{Board, Position};

/// Returns the sum of Manhattan distances of every tile from its goal cell.
///
/// The blank is not counted. Tile `v` belongs at row `(v - 1) / size`, column
/// `(v - 1) % size`. One slide moves exactly one tile by one cell, so the
/// estimate never exceeds the true number of moves left and changes by exactly
/// one per slide.
///
/// # Examples
///
/// ```
/// use tileslide_core::Board;
/// use tileslide_solver::manhattan_distance;
///
/// assert_eq!(manhattan_distance(&Board::solved(4)?), 0);
///
/// let board: Board = "0,1,2,3,4,5,6,7,8".parse()?;
/// // 1, 2, 4, 5, 7, 8 are one cell off; 3 and 6 are three cells off.
/// assert_eq!(manhattan_distance(&board), 12);
/// # Ok::<(), tileslide_core::BoardError>(())
/// ```
#[must_use]
pub fn manhattan_distance(board: &Board) -> u32 {
    let size = board.size();
    (0..size)
        .flat_map(|row| (0..size).map(move |col| Position::new(row, col)))
        .filter_map(|pos| {
            board
                .tile_at(pos)
                .filter(|&tile| tile != Board::BLANK)
                .map(|tile| pos.manhattan_distance(board.goal_position(tile)))
        })
        .sum()
}
