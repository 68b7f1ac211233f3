use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rand::Rng as _;
use sha2::{Digest as _, Sha256};

/// A 32-byte seed that reproduces a scramble.
///
/// Seeds print as 64 lowercase hex digits and parse back from the same form, so
/// a scramble can be shared as text.
///
/// # Examples
///
/// ```
/// use tileslide_generator::PuzzleSeed;
///
/// let seed = PuzzleSeed::from_phrase("daily puzzle");
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<PuzzleSeed>()?, seed);
/// # Ok::<(), tileslide_generator::SeedParseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleSeed([u8; 32]);

impl PuzzleSeed {
    /// Draws a seed from the thread-local random number generator.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0; 32];
        rand::rng().fill(&mut bytes);
        Self(bytes)
    }

    /// Derives a seed from arbitrary text by hashing it with SHA-256.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Self {
        Self(Sha256::digest(phrase.as_bytes()).into())
    }

    /// Wraps raw seed bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for PuzzleSeed {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl Display for PuzzleSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a [`PuzzleSeed`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SeedParseError {
    /// The text is not 64 characters long.
    #[display("seed must be 64 hex digits, found {len} characters")]
    InvalidLength {
        /// Length of the rejected text.
        len: usize,
    },
    /// A character is not a hex digit.
    #[display("invalid hex digit {found:?} at position {index}")]
    InvalidDigit {
        /// Character offset of the offending digit.
        index: usize,
        /// The offending character.
        found: char,
    },
}

impl FromStr for PuzzleSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 64 {
            return Err(SeedParseError::InvalidLength { len });
        }

        let mut bytes = [0; 32];
        let mut digits = s.chars().enumerate().map(|(index, found)| {
            found
                .to_digit(16)
                .and_then(|digit| u8::try_from(digit).ok())
                .ok_or(SeedParseError::InvalidDigit { index, found })
        });
        for byte in &mut bytes {
            let (Some(high), Some(low)) = (digits.next(), digits.next()) else {
                return Err(SeedParseError::InvalidLength { len });
            };
            *byte = (high? << 4) | low?;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

    #[test]
    fn test_hex_round_trip() {
        let seed: PuzzleSeed = HEX.parse().unwrap();
        assert_eq!(seed.as_bytes()[0], 0xc1);
        assert_eq!(seed.as_bytes()[31], 0xf1);
        assert_eq!(seed.to_string(), HEX);

        let upper: PuzzleSeed = HEX.to_uppercase().parse().unwrap();
        assert_eq!(upper, seed);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "abc".parse::<PuzzleSeed>(),
            Err(SeedParseError::InvalidLength { len: 3 })
        );
        let mut bad = HEX.to_owned();
        bad.replace_range(10..11, "g");
        assert_eq!(
            bad.parse::<PuzzleSeed>(),
            Err(SeedParseError::InvalidDigit {
                index: 10,
                found: 'g'
            })
        );
    }

    #[test]
    fn test_phrase_is_stable() {
        assert_eq!(PuzzleSeed::from_phrase("abc"), PuzzleSeed::from_phrase("abc"));
        assert_ne!(PuzzleSeed::from_phrase("abc"), PuzzleSeed::from_phrase("abd"));
        // SHA-256("abc")
        assert_eq!(
            PuzzleSeed::from_phrase("abc").to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(PuzzleSeed::random(), PuzzleSeed::random());
    }
}
