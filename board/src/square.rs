use core::{fmt, str::FromStr};

/// The rank/file steps a knight can take
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// The rank/file steps a king can take (not counting castling)
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// The directions along which a rook slides
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The directions along which a bishop slides
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The directions along which a queen slides
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// A square on the board, named by rank (row) and file (column)
///
/// Both coordinates are in `0..8` for a square on the board, with rank 0 being white's home rank
/// and file 0 being the a-file. Coordinates outside that range are representable so that
/// stepping off the edge of the board, or a caller passing in garbage, can be noticed rather than
/// wrapping around to some other square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    rank: i8,
    file: i8,
}
impl Square {
    /// An off-board square
    ///
    /// Please use this instead of making your own so it's obvious if a deliberately-invalid square
    /// appeared.
    pub const INVALID: Self = Self::new(-1, -1);

    pub const A1: Self = Self::new(0, 0);
    pub const B1: Self = Self::new(0, 1);
    pub const C1: Self = Self::new(0, 2);
    pub const D1: Self = Self::new(0, 3);
    pub const E1: Self = Self::new(0, 4);
    pub const F1: Self = Self::new(0, 5);
    pub const G1: Self = Self::new(0, 6);
    pub const H1: Self = Self::new(0, 7);
    pub const A2: Self = Self::new(1, 0);
    pub const B2: Self = Self::new(1, 1);
    pub const C2: Self = Self::new(1, 2);
    pub const D2: Self = Self::new(1, 3);
    pub const E2: Self = Self::new(1, 4);
    pub const F2: Self = Self::new(1, 5);
    pub const G2: Self = Self::new(1, 6);
    pub const H2: Self = Self::new(1, 7);
    pub const A3: Self = Self::new(2, 0);
    pub const B3: Self = Self::new(2, 1);
    pub const C3: Self = Self::new(2, 2);
    pub const D3: Self = Self::new(2, 3);
    pub const E3: Self = Self::new(2, 4);
    pub const F3: Self = Self::new(2, 5);
    pub const G3: Self = Self::new(2, 6);
    pub const H3: Self = Self::new(2, 7);
    pub const A4: Self = Self::new(3, 0);
    pub const B4: Self = Self::new(3, 1);
    pub const C4: Self = Self::new(3, 2);
    pub const D4: Self = Self::new(3, 3);
    pub const E4: Self = Self::new(3, 4);
    pub const F4: Self = Self::new(3, 5);
    pub const G4: Self = Self::new(3, 6);
    pub const H4: Self = Self::new(3, 7);
    pub const A5: Self = Self::new(4, 0);
    pub const B5: Self = Self::new(4, 1);
    pub const C5: Self = Self::new(4, 2);
    pub const D5: Self = Self::new(4, 3);
    pub const E5: Self = Self::new(4, 4);
    pub const F5: Self = Self::new(4, 5);
    pub const G5: Self = Self::new(4, 6);
    pub const H5: Self = Self::new(4, 7);
    pub const A6: Self = Self::new(5, 0);
    pub const B6: Self = Self::new(5, 1);
    pub const C6: Self = Self::new(5, 2);
    pub const D6: Self = Self::new(5, 3);
    pub const E6: Self = Self::new(5, 4);
    pub const F6: Self = Self::new(5, 5);
    pub const G6: Self = Self::new(5, 6);
    pub const H6: Self = Self::new(5, 7);
    pub const A7: Self = Self::new(6, 0);
    pub const B7: Self = Self::new(6, 1);
    pub const C7: Self = Self::new(6, 2);
    pub const D7: Self = Self::new(6, 3);
    pub const E7: Self = Self::new(6, 4);
    pub const F7: Self = Self::new(6, 5);
    pub const G7: Self = Self::new(6, 6);
    pub const H7: Self = Self::new(6, 7);
    pub const A8: Self = Self::new(7, 0);
    pub const B8: Self = Self::new(7, 1);
    pub const C8: Self = Self::new(7, 2);
    pub const D8: Self = Self::new(7, 3);
    pub const E8: Self = Self::new(7, 4);
    pub const F8: Self = Self::new(7, 5);
    pub const G8: Self = Self::new(7, 6);
    pub const H8: Self = Self::new(7, 7);

    /// Build a square from its rank and file, which need not be on the board
    pub const fn new(rank: i8, file: i8) -> Self {
        Self { rank, file }
    }

    /// The rank (row), where `0` is white's home rank
    pub const fn rank(self) -> i8 {
        self.rank
    }

    /// The file (column), where `0` is the a-file
    pub const fn file(self) -> i8 {
        self.file
    }

    /// Returns if this square is on the board
    ///
    /// ```
    /// use board::Square;
    /// assert!(Square::H8.is_valid());
    /// assert!(!Square::INVALID.is_valid());
    /// assert!(!Square::new(8, 0).is_valid());
    /// ```
    pub const fn is_valid(self) -> bool {
        0 <= self.rank && self.rank < 8 && 0 <= self.file && self.file < 8
    }

    /// The index of this square in a rank-major 64 entry array, if it's on the board
    pub const fn index(self) -> Option<usize> {
        if self.is_valid() {
            Some(self.rank as usize * 8 + self.file as usize)
        } else {
            None
        }
    }

    /// The inverse of [`Self::index`]
    ///
    /// Indices past the end of the board produce an invalid square.
    pub const fn from_index(index: usize) -> Self {
        if index < 64 {
            Self::new((index / 8) as i8, (index % 8) as i8)
        } else {
            Self::INVALID
        }
    }

    /// Offset the given number of ranks and files
    ///
    /// Stepping off the board produces a square for which [`Self::is_valid`] is false.
    ///
    /// ```rust
    /// use board::Square;
    /// assert_eq!(Square::D2, Square::A1.offset(1, 3));
    /// assert_eq!(Square::A1, Square::D2.offset(-1, -3));
    /// assert_eq!(Square::F7, Square::F7.offset(0, 0));
    /// assert!(!Square::D1.offset(-1, 0).is_valid());
    /// assert!(!Square::D8.offset(1, 0).is_valid());
    /// assert!(!Square::A4.offset(0, -1).is_valid());
    /// assert!(!Square::H4.offset(0, 1).is_valid());
    /// ```
    pub const fn offset(self, rank: i8, file: i8) -> Self {
        Self::new(
            self.rank.saturating_add(rank),
            self.file.saturating_add(file),
        )
    }

    /// The `(rank, file)` step from `self` to `other`
    pub const fn delta_to(self, other: Self) -> (i8, i8) {
        (
            other.rank.saturating_sub(self.rank),
            other.file.saturating_sub(self.file),
        )
    }

    /// Whether `other` lies on the same rank, file or diagonal as `self`
    pub const fn is_aligned_with(self, other: Self) -> bool {
        let (rank, file) = self.delta_to(other);
        rank == 0 || file == 0 || rank.unsigned_abs() == file.unsigned_abs()
    }

    /// An iterator over all valid squares on the board, a1 first and h8 last
    ///
    /// ```
    /// assert_eq!(board::Square::all_squares().count(), 64);
    /// ```
    pub fn all_squares() -> impl Iterator<Item = Self> {
        (0..64).map(Self::from_index)
    }

    /// The letter of this square's file, if on the board
    pub const fn file_char(self) -> Option<char> {
        if self.is_valid() {
            Some((b'a' + self.file as u8) as char)
        } else {
            None
        }
    }

    /// The digit of this square's rank, if on the board
    pub const fn rank_char(self) -> Option<char> {
        if self.is_valid() {
            Some((b'1' + self.rank as u8) as char)
        } else {
            None
        }
    }
}
impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Square({self})")
        } else {
            write!(f, "Square(rank {}, file {}, off board)", self.rank, self.file)
        }
    }
}
/// Shows the square's name, or `"XX"` when it isn't on the board
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.file_char(), self.rank_char()) {
            (Some(file), Some(rank)) => write!(f, "{file}{rank}"),
            _ => f.write_str("XX"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("board square name {0:?} was invalid")]
pub struct SquareParseError(pub String);

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file @ b'a'..=b'h', rank @ b'1'..=b'8'] = s.as_bytes() else {
            return Err(SquareParseError(s.to_owned()));
        };
        Ok(Self::new((rank - b'1') as i8, (file - b'a') as i8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::quickcheck;

    #[test]
    fn test_square_name_round_trip() {
        for square in Square::all_squares() {
            assert_eq!(square, Square::from_str(&square.to_string()).unwrap());
        }
    }

    #[test]
    fn test_named_constants() {
        assert_eq!(Square::E4.to_string(), "e4");
        assert_eq!(Square::A8.index(), Some(56));
        assert_eq!(Square::from_index(63), Square::H8);
        assert_eq!(Square::INVALID.to_string(), "XX");
    }

    #[test]
    fn test_bad_square_names() {
        for name in ["", "e", "e9", "i1", "E4", "e44", "4e"] {
            assert!(Square::from_str(name).is_err(), "{name} parsed");
        }
    }

    #[test]
    fn test_alignment() {
        assert!(Square::A1.is_aligned_with(Square::H8));
        assert!(Square::A1.is_aligned_with(Square::A8));
        assert!(Square::D4.is_aligned_with(Square::G1));
        assert!(!Square::A1.is_aligned_with(Square::B3));
    }

    quickcheck! {
        fn test_index_round_trip(rank: i8, file: i8) -> bool {
            let square = Square::new(rank, file);
            match square.index() {
                Some(index) => square.is_valid() && Square::from_index(index) == square,
                None => !square.is_valid(),
            }
        }

        fn test_offset_round_trip(index: u8, rank: i8, file: i8) -> bool {
            let square = Square::from_index(index as usize % 64);
            let (rank, file) = (rank % 8, file % 8);
            square.offset(rank, file).offset(-rank, -file) == square
        }
    }
}
