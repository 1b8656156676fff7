//! Text forms of moves
//!
//! [`SanMove`] is standard algebraic notation, which only makes sense alongside the board it was
//! played on, so this crate only ever renders it. [`LongAlgebraicNotationMove`] names both
//! squares and can be parsed without any context.

use core::{fmt, str::FromStr};

use crate::{PieceKind, Square};

/// Whether a move leaves the opponent in check(mate)
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum CheckStatus {
    #[default]
    None,
    Check,
    Checkmate,
}
/// Returns the status as appended to a move in algebraic notation
impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "",
            Self::Check => "+",
            Self::Checkmate => "#",
        })
    }
}

/// A move in standard algebraic notation, as shown in a game's move list
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SanMove {
    /// What move happened on the board
    pub move_type: SanMoveType,
    /// Whether the move leaves the opponent in check(mate)
    pub check: CheckStatus,
}
impl fmt::Display for SanMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.move_type, self.check)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SanMoveType {
    /// A move which isn't a castle (because those are notated entirely unrelatedly)
    Normal(SanNormalMove),
    CastleKingside,
    CastleQueenside,
}
impl fmt::Display for SanMoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(mv) => mv.fmt(f),
            Self::CastleKingside => f.write_str("O-O"),
            Self::CastleQueenside => f.write_str("O-O-O"),
        }
    }
}

/// All the data from a move that isn't a castle
///
/// The source square is only given as far as needed to tell this move apart from the same kind
/// of piece moving to the same square from elsewhere.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SanNormalMove {
    pub kind: PieceKind,
    pub from_file: Option<char>,
    pub from_rank: Option<char>,
    pub capture: bool,
    pub to_square: Square,
    pub promotion: Option<PieceKind>,
}
impl fmt::Display for SanNormalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        if self.kind != PieceKind::Pawn {
            f.write_char(self.kind.fen_letter())?;
        }
        if let Some(file) = self.from_file {
            f.write_char(file)?;
        }
        if let Some(rank) = self.from_rank {
            f.write_char(rank)?;
        }
        if self.capture {
            f.write_char('x')?;
        }
        write!(f, "{}", self.to_square)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.fen_letter())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("move {0:?} should be two squares optionally followed by a promotion letter")]
    BadLength(String),
    #[error("move {0:?} names a square that isn't on the board")]
    BadSquare(String),
    #[error("move {0:?} promotes into something a pawn can't become")]
    BadPromotion(String),
}

/// A move written as its source and target squares, like `e2e4` or `e7e8q`
///
/// This is the form engines and other programs exchange moves in.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct LongAlgebraicNotationMove {
    pub source: Square,
    pub target: Square,
    pub promotion: Option<PieceKind>,
}
impl LongAlgebraicNotationMove {
    pub const fn new(source: Square, target: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            source,
            target,
            promotion,
        }
    }
}
/// ```
/// use board::{LongAlgebraicNotationMove, PieceKind, Square};
/// let mv = LongAlgebraicNotationMove::new(Square::E7, Square::E8, Some(PieceKind::Knight));
/// assert_eq!(mv.to_string(), "e7e8n");
/// ```
impl fmt::Display for LongAlgebraicNotationMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
impl FromStr for LongAlgebraicNotationMove {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(NotationError::BadLength(s.to_owned()));
        }
        let square = |name: &str| {
            name.parse::<Square>()
                .map_err(|_| NotationError::BadSquare(s.to_owned()))
        };
        let source = square(&s[0..2])?;
        let target = square(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(letter) => match PieceKind::from_letter(letter) {
                Some(kind) if kind.is_promotable() => Some(kind),
                _ => return Err(NotationError::BadPromotion(s.to_owned())),
            },
        };
        Ok(Self {
            source,
            target,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_san_rendering() {
        let pawn_capture = SanMove {
            move_type: SanMoveType::Normal(SanNormalMove {
                kind: PieceKind::Pawn,
                from_file: Some('e'),
                from_rank: None,
                capture: true,
                to_square: Square::D5,
                promotion: None,
            }),
            check: CheckStatus::None,
        };
        assert_eq!(pawn_capture.to_string(), "exd5");

        let knight = SanMove {
            move_type: SanMoveType::Normal(SanNormalMove {
                kind: PieceKind::Knight,
                from_file: Some('b'),
                from_rank: Some('5'),
                capture: true,
                to_square: Square::D4,
                promotion: None,
            }),
            check: CheckStatus::Check,
        };
        assert_eq!(knight.to_string(), "Nb5xd4+");

        let promotion = SanMove {
            move_type: SanMoveType::Normal(SanNormalMove {
                kind: PieceKind::Pawn,
                from_file: None,
                from_rank: None,
                capture: false,
                to_square: Square::A8,
                promotion: Some(PieceKind::Queen),
            }),
            check: CheckStatus::Checkmate,
        };
        assert_eq!(promotion.to_string(), "a8=Q#");

        let castle = SanMove {
            move_type: SanMoveType::CastleQueenside,
            check: CheckStatus::None,
        };
        assert_eq!(castle.to_string(), "O-O-O");
    }

    #[test]
    fn test_long_algebraic_round_trip() {
        #[track_caller]
        fn assert_round_trip(text: &str) {
            let round_trip = LongAlgebraicNotationMove::from_str(text)
                .expect("Couldn't parse input from string")
                .to_string();
            assert_eq!(text, &round_trip);
        }
        assert_round_trip("e2e4");
        assert_round_trip("g8f6");
        assert_round_trip("a7a8q");
        assert_round_trip("h2h1r");
    }

    #[test]
    fn test_long_algebraic_rejects_garbage() {
        assert!(matches!(
            "e2".parse::<LongAlgebraicNotationMove>(),
            Err(NotationError::BadLength(_))
        ));
        assert!(matches!(
            "e2e9".parse::<LongAlgebraicNotationMove>(),
            Err(NotationError::BadSquare(_))
        ));
        assert!(matches!(
            "e7e8k".parse::<LongAlgebraicNotationMove>(),
            Err(NotationError::BadPromotion(_))
        ));
        assert!(matches!(
            "e7e8é".parse::<LongAlgebraicNotationMove>(),
            Err(NotationError::BadLength(_))
        ));
    }
}
