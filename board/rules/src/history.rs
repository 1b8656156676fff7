use board::{Color, Piece, PieceKind, SanMove, Square};

use crate::{castling::Wing, CastleRights, GameStatus};

/// One executed move, with everything needed to take it back
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// Counts up from 1 over the moves of a game
    pub sequence: usize,
    pub source: Square,
    pub target: Square,
    /// The piece that moved, as it was before any promotion
    pub piece: Piece,
    /// The piece taken and the square it was taken from, which for en passant isn't `target`
    pub captured: Option<(Piece, Square)>,
    pub promotion: Option<PieceKind>,
    /// Set if this move was a castle
    pub castle: Option<Wing>,
    pub is_en_passant: bool,
    /// How the move reads in standard algebraic notation
    pub san: SanMove,

    // what the move replaced
    pub prior_status: GameStatus,
    /// Whether the side that moved was in check beforehand
    pub was_in_check: bool,
    pub prior_castles: CastleRights,
    pub prior_en_passant: Option<Square>,
    pub prior_halfmove_clock: u16,
    pub prior_fullmove_number: u16,
}

impl MoveRecord {
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub const fn is_castle(&self) -> bool {
        self.castle.is_some()
    }

    pub const fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    /// The side that made this move
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    /// The piece standing on `target` once the move was made
    pub const fn placed_piece(&self) -> Piece {
        match self.promotion {
            Some(kind) => Piece::new(kind, self.piece.color),
            None => self.piece,
        }
    }
}

/// The moves of a game so far, most recent last
///
/// Moves only ever come off the end they went on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
}

impl MoveHistory {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// The sequence number the next record pushed should carry
    pub fn next_sequence(&self) -> usize {
        self.records.len() + 1
    }

    pub fn push(&mut self, record: MoveRecord) {
        debug_assert_eq!(record.sequence, self.next_sequence(), "history out of order");
        self.records.push(record);
    }

    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MoveRecord> + ExactSizeIterator + '_ {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a MoveHistory {
    type Item = &'a MoveRecord;
    type IntoIter = core::slice::Iter<'a, MoveRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
