//! Move tokens.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::ParseMoveError;

/// The direction the blank moves in one slide.
///
/// Moving the blank up slides the tile above it down into the blank's old cell,
/// so a token names both the direction the blank travelled and, equivalently,
/// which neighbouring tile was slid. Tokens print as `U`, `D`, `L`, `R`.
///
/// # Examples
///
/// ```
/// use tileslide_core::Move;
///
/// assert_eq!(Move::Up.opposite(), Move::Down);
/// assert_eq!(Move::Left.to_string(), "L");
/// assert_eq!("right".parse::<Move>()?, Move::Right);
/// # Ok::<(), tileslide_core::ParseMoveError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Move {
    /// The blank moves one row up.
    #[default]
    Up,
    /// The blank moves one row down.
    Down,
    /// The blank moves one column left.
    Left,
    /// The blank moves one column right.
    Right,
}

impl Move {
    /// All moves, in the order the move generator tries them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(row, col)` offset applied to the blank.
    #[must_use]
    #[inline]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the single-letter token for this move.
    #[must_use]
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Right => 'R',
        }
    }

    /// Parses a single-letter token, ignoring case.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Self::Up),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            _ => None,
        }
    }

    /// Returns the lowercase English name of the move.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(mv) = Self::from_char(c)
        {
            return Ok(mv);
        }
        Self::ALL
            .into_iter()
            .find(|mv| mv.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseMoveError {
                token: s.to_owned(),
            })
    }
}

/// Parses a move sequence.
///
/// Tokens may be separated by whitespace, commas, or arrows (`→`, `->`), and may
/// be either full names (`up`) or letters. A run of letters such as `UURD` is read
/// one move per letter.
///
/// # Errors
///
/// Returns [`ParseMoveError`] naming the first token that is not a move.
///
/// # Examples
///
/// ```
/// use tileslide_core::{Move, parse_moves};
///
/// let moves = parse_moves("U → R, down LL")?;
/// assert_eq!(
///     moves,
///     [Move::Up, Move::Right, Move::Down, Move::Left, Move::Left]
/// );
/// # Ok::<(), tileslide_core::ParseMoveError>(())
/// ```
pub fn parse_moves(s: &str) -> Result<Vec<Move>, ParseMoveError> {
    let mut moves = Vec::new();
    let tokens = s
        .split(|c: char| c.is_whitespace() || c == ',' || c == '→')
        .flat_map(|token| token.split("->"))
        .filter(|token| !token.is_empty());
    for token in tokens {
        if let Ok(mv) = token.parse() {
            moves.push(mv);
            continue;
        }
        for c in token.chars() {
            let mv = Move::from_char(c).ok_or_else(|| ParseMoveError {
                token: token.to_owned(),
            })?;
            moves.push(mv);
        }
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for mv in Move::ALL {
            assert_ne!(mv.opposite(), mv);
            assert_eq!(mv.opposite().opposite(), mv);
            let (dr, dc) = mv.offset();
            let (or, oc) = mv.opposite().offset();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
    }

    #[test]
    fn test_token_round_trip() {
        for mv in Move::ALL {
            assert_eq!(Move::from_char(mv.as_char()), Some(mv));
            assert_eq!(mv.to_string().parse::<Move>().unwrap(), mv);
            assert_eq!(mv.name().parse::<Move>().unwrap(), mv);
        }
        assert_eq!("u".parse::<Move>().unwrap(), Move::Up);
        assert_eq!("LEFT".parse::<Move>().unwrap(), Move::Left);
    }

    #[test]
    fn test_rejects_unknown_tokens() {
        assert!("x".parse::<Move>().is_err());
        assert!("".parse::<Move>().is_err());
        assert!("upward".parse::<Move>().is_err());
    }

    #[test]
    fn test_parse_moves_separators() {
        assert_eq!(parse_moves("").unwrap(), []);
        assert_eq!(
            parse_moves("U->D  l,r").unwrap(),
            [Move::Up, Move::Down, Move::Left, Move::Right]
        );
        assert_eq!(
            parse_moves("UDLR").unwrap(),
            [Move::Up, Move::Down, Move::Left, Move::Right]
        );
    }

    #[test]
    fn test_parse_moves_reports_bad_token() {
        let err = parse_moves("U R UXD").unwrap_err();
        assert_eq!(err.token, "UXD");
    }
}
