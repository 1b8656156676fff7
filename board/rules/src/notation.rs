//! Writing out moves in standard algebraic notation

use board::{CheckStatus, PieceKind, SanMove, SanMoveType, SanNormalMove, Square};

use crate::{castling::Wing, BoardState, RuleEngine};

impl BoardState {
    /// Describe the given move in standard algebraic notation, as it would be played from this
    /// position
    ///
    /// The check status is left as [`CheckStatus::None`], as it can only be known once the move
    /// has been made. Returns `None` if there's no piece at `source`.
    pub fn san_move(
        &self,
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> Option<SanMove> {
        let piece = self.board.get(source)?;
        let castle = match piece.kind {
            PieceKind::King => Wing::of_king_move(piece.color, source, target),
            _ => None,
        };
        let move_type = match castle {
            Some(Wing::Kingside) => SanMoveType::CastleKingside,
            Some(Wing::Queenside) => SanMoveType::CastleQueenside,
            None => {
                let capture = self.board.get(target).is_some()
                    || self.is_en_passant(piece, source, target);
                let (from_file, from_rank) = if piece.kind == PieceKind::Pawn {
                    // Pawn captures always name the file they came from
                    (capture.then(|| source.file_char()).flatten(), None)
                } else {
                    self.disambiguation(source, target)
                };
                SanMoveType::Normal(SanNormalMove {
                    kind: piece.kind,
                    from_file,
                    from_rank,
                    capture,
                    to_square: target,
                    promotion: promotion.filter(|_| piece.kind == PieceKind::Pawn),
                })
            }
        };
        Some(SanMove {
            move_type,
            check: CheckStatus::None,
        })
    }

    /// How much of the source square is needed to tell this move apart from other pieces of the
    /// same kind and color that could legally move to `target`
    fn disambiguation(&self, source: Square, target: Square) -> (Option<char>, Option<char>) {
        let Some(piece) = self.board.get(source) else {
            return (None, None);
        };
        let rivals = self
            .board
            .pieces_of(piece.color)
            .filter(|&(square, other)| {
                square != source
                    && other.kind == piece.kind
                    && RuleEngine.legal_moves(self, square).has(target)
            })
            .map(|(square, _)| square)
            .collect::<Vec<_>>();
        if rivals.is_empty() {
            (None, None)
        } else if rivals.iter().all(|rival| rival.file() != source.file()) {
            (source.file_char(), None)
        } else if rivals.iter().all(|rival| rival.rank() != source.rank()) {
            (None, source.rank_char())
        } else {
            (source.file_char(), source.rank_char())
        }
    }
}
