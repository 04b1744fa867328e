use std::fmt;
use std::ops::{Add, Index, Sub};
use std::str::FromStr;

use crate::error::Error;

/// Board width and height.
pub const SIZE: i8 = 8;

/// A board coordinate.
///
/// `x` is the file (0 = a) and `y` is the row counted from the top of the
/// board (0 = rank 8, 7 = rank 1). The same type is used for offsets, so
/// arithmetic never checks bounds; call [`Square::is_valid`] before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub y: i8,
    pub x: i8,
}

impl Square {
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { y, x }
    }

    /// True iff both coordinates lie on the board.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.x >= 0 && self.x < SIZE && self.y >= 0 && self.y < SIZE
    }

    /// All 64 on-board squares, top row first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SIZE).flat_map(|y| (0..SIZE).map(move |x| Square::new(x, y)))
    }

    /// File letter, `'a'..='h'`.
    #[inline]
    pub fn file_char(self) -> char {
        (b'a' + self.x as u8) as char
    }

    /// Chess rank, 1-8.
    #[inline]
    pub const fn rank(self) -> i8 {
        SIZE - self.y
    }

    /// Algebraic notation such as `"e3"`.
    pub fn to_notation(self) -> String {
        self.to_string()
    }

    /// Convert into a `shakmaty` square. Only meaningful for valid squares.
    pub(crate) fn to_shakmaty(self) -> shakmaty::Square {
        debug_assert!(self.is_valid());
        shakmaty::Square::from_coords(
            shakmaty::File::new(self.x as u32),
            shakmaty::Rank::new((SIZE - 1 - self.y) as u32),
        )
    }
}

impl Add for Square {
    type Output = Square;

    #[inline]
    fn add(self, offset: Square) -> Square {
        Square::new(self.x + offset.x, self.y + offset.y)
    }
}

impl Sub for Square {
    type Output = Square;

    #[inline]
    fn sub(self, offset: Square) -> Square {
        Square::new(self.x - offset.x, self.y - offset.y)
    }
}

/// `square[0]` is x, `square[1]` is y.
impl Index<usize> for Square {
    type Output = i8;

    fn index(&self, index: usize) -> &i8 {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("square index out of range: {index} (a square only has x and y)"),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", self.file_char(), self.rank())
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Parse algebraic notation like "e4" (case-insensitive).
impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(Error::InvalidSquare(s.to_string()));
        };
        let file = file.to_ascii_lowercase();
        let rank = rank
            .to_digit(10)
            .ok_or_else(|| Error::InvalidSquare(s.to_string()))?;

        if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
            return Err(Error::InvalidSquare(s.to_string()));
        }

        Ok(Square::new((file as u8 - b'a') as i8, SIZE - rank as i8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_validity_matches_range() {
        for x in -3..11 {
            for y in -3..11 {
                let expected = (0..8).contains(&x) && (0..8).contains(&y);
                assert_eq!(Square::new(x, y).is_valid(), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_offset_arithmetic_is_unchecked() {
        let sq = Square::new(7, 0) + Square::new(1, -1);
        assert_eq!(sq, Square::new(8, -1));
        assert!(!sq.is_valid());
        assert_eq!(sq - Square::new(1, -1), Square::new(7, 0));
    }

    #[test_case(0, 0, "a8")]
    #[test_case(7, 7, "h1")]
    #[test_case(4, 5, "e3")]
    #[test_case(4, 4, "e4")]
    fn test_notation(x: i8, y: i8, expected: &str) {
        let sq = Square::new(x, y);
        assert_eq!(sq.to_notation(), expected);
        assert_eq!(expected.parse::<Square>().unwrap(), sq);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("E4".parse::<Square>().unwrap(), Square::new(4, 4));
    }

    #[test_case(""; "empty")]
    #[test_case("a"; "too short")]
    #[test_case("a9"; "bad rank")]
    #[test_case("i1"; "bad file")]
    #[test_case("a0"; "rank zero")]
    #[test_case("abc"; "too long")]
    fn test_from_str_invalid(input: &str) {
        assert!(matches!(input.parse::<Square>(), Err(Error::InvalidSquare(_))));
    }

    #[test]
    fn test_index() {
        let sq = Square::new(3, 6);
        assert_eq!(sq[0], 3);
        assert_eq!(sq[1], 6);
    }

    #[test]
    #[should_panic(expected = "square index out of range")]
    fn test_index_out_of_range_panics() {
        let _ = Square::new(3, 6)[2];
    }

    #[test]
    fn test_shakmaty_conversion() {
        assert_eq!(Square::new(0, 7).to_shakmaty(), shakmaty::Square::A1);
        assert_eq!(Square::new(4, 5).to_shakmaty(), shakmaty::Square::E3);
        assert_eq!(Square::new(7, 0).to_shakmaty(), shakmaty::Square::H8);
    }

    #[test]
    fn test_all_covers_board() {
        let all: Vec<_> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Square::new(0, 0));
        assert_eq!(all[63], Square::new(7, 7));
        assert!(all.iter().all(|sq| sq.is_valid()));
    }
}
