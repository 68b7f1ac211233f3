use tileslide_core::{Board, BoardError, Move, Position};
use tileslide_generator::{GeneratedPuzzle, PuzzleSeed, ShuffleGenerator};
use tileslide_solver::{Search, SearchLimits, SearchOutcome, Strategy};

use crate::GameError;

/// A solution attached to a session, with a cursor into it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Playback {
    moves: Vec<Move>,
    next: usize,
}

/// A sliding-tile play session.
///
/// The session owns one live board and counts every slide made on it, whether
/// by the player or by solution playback. Scrambling, resetting, and loading a
/// board start the count over.
///
/// # Example
///
/// ```
/// use tileslide_core::{Board, Move};
/// use tileslide_game::Game;
/// use tileslide_solver::{SearchLimits, Strategy};
///
/// let mut game = Game::new("1,2,3,4,0,5,7,8,6".parse::<Board>()?);
/// let outcome = game.solve(Strategy::AStar, SearchLimits::default());
/// assert!(outcome.is_solved());
///
/// while let Some(mv) = game.step_solution()? {
///     println!("blank moved {}", mv.name());
/// }
/// assert!(game.is_solved());
/// assert_eq!(game.move_count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    move_count: usize,
    selected: Option<Position>,
    playback: Option<Playback>,
}

impl Game {
    /// Starts a session on `board`.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            move_count: 0,
            selected: None,
            playback: None,
        }
    }

    /// Starts a session on a generated puzzle.
    #[must_use]
    pub fn from_puzzle(puzzle: GeneratedPuzzle) -> Self {
        log::debug!("new puzzle from seed {}", puzzle.seed);
        Self::new(puzzle.board)
    }

    /// Starts a session on a solved board of `size`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `size` is out of range.
    pub fn solved(size: u8) -> Result<Self, BoardError> {
        Ok(Self::new(Board::solved(size)?))
    }

    /// Returns the live board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the number of slides made since the last scramble, reset or load.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Returns `true` if the live board is solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Replaces the live board and starts the count over.
    pub fn load(&mut self, board: Board) {
        log::debug!("loaded board {board}");
        *self = Self::new(board);
    }

    /// Puts the live board back in the solved configuration.
    pub fn reset(&mut self) {
        log::debug!("reset {0}x{0} board", self.board.size());
        *self = Self::new(self.board.goal());
    }

    /// Scrambles the live board with `moves` random blank moves from the solved
    /// configuration.
    pub fn scramble(&mut self, moves: usize, seed: PuzzleSeed) -> &Board {
        let puzzle = ShuffleGenerator::for_board(&self.board)
            .with_moves(moves)
            .generate_with_seed(seed);
        *self = Self::from_puzzle(puzzle);
        &self.board
    }

    /// Switches to a `size`×`size` board scrambled with the resize scramble length.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedSize`] if `size` is out of range.
    pub fn resize(&mut self, size: u8, seed: PuzzleSeed) -> Result<&Board, BoardError> {
        let generator =
            ShuffleGenerator::new(size)?.with_moves(ShuffleGenerator::resize_moves(size));
        *self = Self::from_puzzle(generator.generate_with_seed(seed));
        Ok(&self.board)
    }

    /// Moves the blank one cell.
    ///
    /// Any attached solution is dropped, since it no longer matches the board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidMove`] if the blank is on the edge in the
    /// direction of `mv`.
    pub fn move_blank(&mut self, mv: Move) -> Result<(), GameError> {
        self.board.slide(mv)?;
        self.move_count += 1;
        self.drop_solution();
        Ok(())
    }

    /// Slides the tile at `pos` into the blank.
    ///
    /// Returns the move the blank made.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutsideBoard`] for a position off the board,
    /// [`GameError::BlankTile`] for the blank itself, and
    /// [`GameError::NotAdjacent`] for a tile that does not touch the blank.
    pub fn slide_tile(&mut self, pos: Position) -> Result<Move, GameError> {
        if !pos.is_within(self.board.size()) {
            return Err(GameError::OutsideBoard { pos });
        }
        let blank = self.board.blank();
        if pos == blank {
            return Err(GameError::BlankTile { pos });
        }
        let mv = blank
            .direction_to(pos)
            .ok_or(GameError::NotAdjacent { pos, blank })?;
        self.move_blank(mv)?;
        Ok(mv)
    }

    /// Returns the selected cell.
    #[must_use]
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Returns the value of the selected cell.
    #[must_use]
    pub fn selected_tile(&self) -> Option<u8> {
        self.selected.and_then(|pos| self.board.tile_at(pos))
    }

    /// Selects a cell.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutsideBoard`] for a position off the board.
    pub fn select(&mut self, pos: Position) -> Result<(), GameError> {
        if !pos.is_within(self.board.size()) {
            return Err(GameError::OutsideBoard { pos });
        }
        self.selected = Some(pos);
        Ok(())
    }

    /// Selects the blank cell.
    pub fn select_blank(&mut self) -> Position {
        let blank = self.board.blank();
        self.selected = Some(blank);
        blank
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Moves the selection one cell, staying put at the edge.
    ///
    /// Returns the new selection, or `None` if nothing is selected.
    pub fn move_selection(&mut self, direction: Move) -> Option<Position> {
        let current = self.selected?;
        let next = current
            .neighbor(direction, self.board.size())
            .unwrap_or(current);
        self.selected = Some(next);
        Some(next)
    }

    /// Attaches a solution for step-by-step playback, replacing any previous one.
    pub fn attach_solution(&mut self, moves: Vec<Move>) {
        log::debug!("attached solution with {} moves", moves.len());
        self.playback = Some(Playback { moves, next: 0 });
    }

    /// Returns the attached solution, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&[Move]> {
        self.playback.as_ref().map(|playback| &playback.moves[..])
    }

    /// Returns the moves of the attached solution not yet played.
    #[must_use]
    pub fn remaining_solution(&self) -> &[Move] {
        self.playback
            .as_ref()
            .map_or(&[], |playback| &playback.moves[playback.next..])
    }

    /// Plays the next move of the attached solution.
    ///
    /// Returns `Ok(None)` once every move has been played.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoSolution`] if no solution is attached, and
    /// [`GameError::InvalidMove`] if the next move does not fit the board; the
    /// solution is dropped in that case.
    pub fn step_solution(&mut self) -> Result<Option<Move>, GameError> {
        let playback = self.playback.as_mut().ok_or(GameError::NoSolution)?;
        let Some(&mv) = playback.moves.get(playback.next) else {
            return Ok(None);
        };
        if let Err(err) = self.board.slide(mv) {
            log::warn!("dropping solution: {err}");
            self.playback = None;
            return Err(err.into());
        }
        playback.next += 1;
        self.move_count += 1;
        Ok(Some(mv))
    }

    /// Drops the attached solution.
    pub fn clear_solution(&mut self) {
        self.drop_solution();
    }

    /// Searches for a solution from the live board and attaches it if found.
    ///
    /// Progress is logged once per slice.
    pub fn solve(&mut self, strategy: Strategy, limits: SearchLimits) -> SearchOutcome {
        let outcome = Search::new(self.board.clone(), strategy)
            .with_limits(limits)
            .run_to_end(|nodes| log::debug!("{strategy}: explored {nodes} nodes"));
        if let Some(solution) = outcome.solution() {
            self.attach_solution(solution.moves().to_vec());
        }
        outcome
    }

    fn drop_solution(&mut self) {
        if self.playback.take().is_some() {
            log::debug!("cleared attached solution");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn near_goal() -> Game {
        Game::new("1,2,3,4,0,5,7,8,6".parse().unwrap())
    }

    #[test]
    fn test_slide_tile_adjacent() {
        let mut game = near_goal();
        assert_eq!(game.slide_tile(Position::new(1, 2)).unwrap(), Move::Right);
        assert_eq!(game.slide_tile(Position::new(2, 2)).unwrap(), Move::Down);
        assert!(game.is_solved());
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn test_slide_tile_rejections() {
        let mut game = near_goal();
        let before = game.clone();
        assert_eq!(
            game.slide_tile(Position::new(1, 1)),
            Err(GameError::BlankTile {
                pos: Position::new(1, 1)
            })
        );
        assert_eq!(
            game.slide_tile(Position::new(0, 0)),
            Err(GameError::NotAdjacent {
                pos: Position::new(0, 0),
                blank: Position::new(1, 1)
            })
        );
        assert_eq!(
            game.slide_tile(Position::new(3, 1)),
            Err(GameError::OutsideBoard {
                pos: Position::new(3, 1)
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_move_blank_out_of_bounds() {
        let mut game = Game::solved(3).unwrap();
        assert!(matches!(
            game.move_blank(Move::Right),
            Err(GameError::InvalidMove(_))
        ));
        assert_eq!(game.move_count(), 0);
        game.move_blank(Move::Up).unwrap();
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_selection_stays_on_board() {
        let mut game = Game::solved(3).unwrap();
        assert_eq!(game.move_selection(Move::Up), None);
        game.select(Position::new(0, 1)).unwrap();
        assert_eq!(game.selected_tile(), Some(2));
        assert_eq!(game.move_selection(Move::Up), Some(Position::new(0, 1)));
        assert_eq!(game.move_selection(Move::Left), Some(Position::new(0, 0)));
        assert_eq!(game.move_selection(Move::Left), Some(Position::new(0, 0)));
        assert_eq!(game.select_blank(), Position::new(2, 2));
        assert_eq!(game.selected_tile(), Some(Board::BLANK));
        assert!(game.select(Position::new(0, 3)).is_err());
        game.deselect();
        assert_eq!(game.selected(), None);
    }

    #[test]
    fn test_scramble_and_reset() {
        let mut game = Game::solved(4).unwrap();
        game.move_blank(Move::Up).unwrap();
        game.select(Position::new(0, 0)).unwrap();

        let seed = PuzzleSeed::from_phrase("scramble");
        let board = game.scramble(80, seed).clone();
        let expected = ShuffleGenerator::new(4)
            .unwrap()
            .with_moves(80)
            .generate_with_seed(seed)
            .board;
        assert_eq!(board, expected);
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.selected(), None);

        game.reset();
        assert!(game.is_solved());
        assert_eq!(game.board().size(), 4);
    }

    #[test]
    fn test_resize() {
        let mut game = Game::solved(3).unwrap();
        let seed = PuzzleSeed::from_phrase("resize");
        assert_eq!(game.resize(5, seed).unwrap().size(), 5);
        assert!(game.board().is_solvable());
        assert!(game.resize(9, seed).is_err());
        assert_eq!(game.board().size(), 5);
    }

    #[test]
    fn test_solution_playback() {
        let mut game = near_goal();
        assert_eq!(game.step_solution(), Err(GameError::NoSolution));

        game.attach_solution(vec![Move::Right, Move::Down]);
        assert_eq!(game.remaining_solution(), [Move::Right, Move::Down]);
        assert_eq!(game.step_solution(), Ok(Some(Move::Right)));
        assert_eq!(game.remaining_solution(), [Move::Down]);
        assert_eq!(game.step_solution(), Ok(Some(Move::Down)));
        assert_eq!(game.step_solution(), Ok(None));
        assert!(game.is_solved());
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.solution(), Some(&[Move::Right, Move::Down][..]));

        game.clear_solution();
        assert_eq!(game.solution(), None);
        assert!(game.remaining_solution().is_empty());
    }

    #[test]
    fn test_manual_move_drops_solution() {
        let mut game = near_goal();
        game.attach_solution(vec![Move::Right, Move::Down]);
        game.move_blank(Move::Up).unwrap();
        assert_eq!(game.solution(), None);
    }

    #[test]
    fn test_mismatched_solution_is_dropped() {
        let mut game = Game::solved(3).unwrap();
        game.attach_solution(vec![Move::Down]);
        assert!(matches!(
            game.step_solution(),
            Err(GameError::InvalidMove(_))
        ));
        assert_eq!(game.solution(), None);
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_solve_attaches_solution() {
        let mut game = near_goal();
        let outcome = game.solve(Strategy::BreadthFirst, SearchLimits::default());
        assert!(outcome.is_solved());
        assert_eq!(game.remaining_solution(), [Move::Right, Move::Down]);

        let mut stuck = Game::new("2,1,3,0".parse().unwrap());
        let outcome = stuck.solve(Strategy::AStar, SearchLimits::default());
        assert!(outcome.is_exhausted());
        assert_eq!(stuck.solution(), None);
    }
}
