use core::{
    fmt,
    ops::{BitAnd, BitOr, BitOrAssign, Not},
};

use board::Square;

/// A set of squares, one bit per square (equivalent to a `u64`)
///
/// Bit `rank * 8 + file` is set when the square is in the set, so a1 is the lowest bit and h8 the
/// highest.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(pub u64);

impl SquareSet {
    /// Create an empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Produce a set holding only the given square.
    ///
    /// If the square is off the board, this returns the empty set.
    pub const fn from_square(square: Square) -> Self {
        match square.index() {
            Some(index) => Self(1 << index),
            None => Self::empty(),
        }
    }

    /// Add a square to the set, ignoring squares off the board
    pub fn insert(&mut self, square: Square) {
        *self |= square;
    }

    /// Returns true if the given square is in the set
    pub const fn has(self, square: Square) -> bool {
        self.intersects(Self::from_square(square))
    }

    /// Query if the set is empty
    ///
    /// ```
    /// use rules::SquareSet;
    /// assert!(SquareSet::empty().is_empty());
    /// assert!(!SquareSet(0x01).is_empty());
    /// ```
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `self & other` is not empty
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if `self & other == other`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Produce an iterator of the squares in the set, from a1 to h8
    ///
    /// ```
    /// use board::Square;
    /// use rules::SquareSet;
    /// assert_eq!(SquareSet::empty().iter().count(), 0);
    /// assert_eq!(
    ///     (SquareSet::from_square(Square::H1) | Square::A1).iter().collect::<Vec<_>>(),
    ///     vec![Square::A1, Square::H1],
    /// );
    /// assert_eq!(SquareSet(!0).iter().count(), 64);
    /// ```
    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut remaining = self.0;
        core::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let index = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            Some(Square::from_index(index))
        })
    }

    /// Returns the number of squares in the set
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }
}

/// Bit-wise operations for combining sets
///
/// These are `const` equivalents to `&`, `|`, `!`
impl SquareSet {
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub const fn negation(self) -> Self {
        Self(!self.0)
    }
}

impl BitOr<SquareSet> for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}
impl BitOr<Square> for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Square) -> Self::Output {
        self.union(Self::from_square(rhs))
    }
}
impl<T> BitOrAssign<T> for SquareSet
where
    SquareSet: BitOr<T, Output = SquareSet>,
{
    fn bitor_assign(&mut self, rhs: T) {
        *self = *self | rhs
    }
}
impl BitAnd<SquareSet> for SquareSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}
impl Not for SquareSet {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.negation()
    }
}

impl From<Square> for SquareSet {
    fn from(value: Square) -> Self {
        Self::from_square(value)
    }
}
impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |set, square| set | square)
    }
}
impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
/// Display as a TUI version of a grid, rank 8 at the top
///
/// ```
/// use board::Square;
/// use rules::SquareSet;
///
/// assert_eq!(
///     SquareSet::from(Square::A1).to_string(),
///     "........\n........\n........\n........\n........\n........\n........\nX.......\n",
/// );
/// assert_eq!(
///     SquareSet::from(Square::H8).to_string(),
///     ".......X\n........\n........\n........\n........\n........\n........\n........\n",
/// );
/// ```
impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for rank in (0..8).rev() {
            for file in 0..8 {
                f.write_char(if self.has(Square::new(rank, file)) {
                    'X'
                } else {
                    '.'
                })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck::{quickcheck, Arbitrary, Gen};

    impl Arbitrary for SquareSet {
        fn arbitrary(g: &mut Gen) -> Self {
            Self(u64::arbitrary(g))
        }
    }

    quickcheck! {
        fn test_negation_round_trip(set: SquareSet) -> bool {
            set == !!set
        }

        fn test_len_and_iter_agree(set: SquareSet) -> bool {
            set.len() as usize == set.iter().count()
        }

        fn test_iter_collect_round_trip(set: SquareSet) -> bool {
            set.iter().collect::<SquareSet>() == set
        }
    }

    #[test]
    fn test_off_board_squares_are_ignored() {
        let mut set = SquareSet::empty();
        set.insert(Square::INVALID);
        set.insert(Square::new(3, 8));
        assert!(set.is_empty());
        assert!(!set.has(Square::INVALID));
    }

    #[test]
    fn test_every_square_has_its_own_bit() {
        let all = Square::all_squares().collect::<SquareSet>();
        assert_eq!(all, SquareSet(!0));
        for square in Square::all_squares() {
            assert_eq!(SquareSet::from(square).len(), 1, "{square}");
        }
    }
}
