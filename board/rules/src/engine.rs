use board::{Color, PieceKind, Square};

use crate::{
    attacks::is_attacked,
    movement::geometric_moves,
    BoardState, IllegalMove, SquareSet,
};

/// How a candidate move stands in a given position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveClass {
    /// The move can be made as it is
    Legal,
    /// The move is legal, but it's a pawn reaching the far rank and a piece to promote into must
    /// be picked from the given kinds first
    RequiresPromotion([PieceKind; 4]),
    /// The move can't be made, for the given reason
    Illegal(IllegalMove),
}

impl MoveClass {
    /// Whether the move can be made (possibly after picking a promotion)
    pub const fn is_playable(self) -> bool {
        !matches!(self, Self::Illegal(_))
    }
}

/// The rules of chess, as questions asked about a [`BoardState`]
///
/// This holds no state of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleEngine;

impl RuleEngine {
    /// Decide whether moving the piece on `source` to `target` is legal for the side to move
    ///
    /// The checks happen in this order, and the first failure is reported:
    ///  1. Both squares are on the board.
    ///  2. There's a piece on `source`, and it belongs to the side to move.
    ///  3. The move goes somewhere, and not onto a piece of the mover's own color.
    ///  4. The piece's movement rule reaches `target`.
    ///  5. Making the move on a copy of the position doesn't leave the mover's king attacked.
    ///
    /// A legal pawn move onto the far rank is reported as needing a promotion rather than as
    /// legal, whether or not it captures.
    pub fn classify(&self, state: &BoardState, source: Square, target: Square) -> MoveClass {
        match self.check_move(state, source, target) {
            Ok(()) => {}
            Err(reason) => return MoveClass::Illegal(reason),
        }
        let is_promotion = state.board.get(source).is_some_and(|piece| {
            piece.kind == PieceKind::Pawn && target.rank() == piece.color.promotion_rank()
        });
        if is_promotion {
            MoveClass::RequiresPromotion(PieceKind::PROMOTIONS)
        } else {
            MoveClass::Legal
        }
    }

    fn check_move(
        &self,
        state: &BoardState,
        source: Square,
        target: Square,
    ) -> Result<(), IllegalMove> {
        if !source.is_valid() || !target.is_valid() {
            return Err(IllegalMove::OffBoard);
        }
        let piece = state.board.get(source).ok_or(IllegalMove::NoPieceAtSource)?;
        if piece.color != state.side_to_move {
            return Err(IllegalMove::WrongSide);
        }
        if source == target {
            return Err(IllegalMove::SameSquare);
        }
        if state.board.is_color(target, piece.color) {
            return Err(IllegalMove::OwnPieceCapture);
        }
        if !geometric_moves(state, source).has(target) {
            return Err(IllegalMove::GeometricMismatch);
        }
        if !self.keeps_king_safe(state, source, target) {
            return Err(IllegalMove::LeavesKingInCheck);
        }
        Ok(())
    }

    /// Returns true if making this move wouldn't leave the mover's own king attacked
    ///
    /// The move is made on a scratch copy of the position, en passant captures and all, so this
    /// has no effect on `state`.
    pub fn keeps_king_safe(&self, state: &BoardState, source: Square, target: Square) -> bool {
        let mut scratch = state.clone();
        let Some(effects) = scratch.relocate(source, target, None) else {
            return false;
        };
        let color = effects.piece.color;
        !is_attacked(&scratch.board, scratch.king_square(color), color.other())
    }

    /// The squares the piece on `at` can legally move to
    ///
    /// These are its geometric moves, less the ones that leave its own king attacked. This
    /// doesn't look at whose turn it is.
    pub fn legal_moves(&self, state: &BoardState, at: Square) -> SquareSet {
        geometric_moves(state, at)
            .iter()
            .filter(|&target| self.keeps_king_safe(state, at, target))
            .collect()
    }

    /// Returns true if the given side has at least one legal move
    pub fn has_legal_move(&self, state: &BoardState, side: Color) -> bool {
        state
            .board
            .pieces_of(side)
            .any(|(square, _)| !self.legal_moves(state, square).is_empty())
    }

    /// Returns `true` if the given color's king is attacked
    pub fn is_in_check(&self, state: &BoardState, side: Color) -> bool {
        debug_assert_eq!(
            state.board.find_king(side),
            Some(state.king_square(side)),
            "king cache out of date"
        );
        is_attacked(&state.board, state.king_square(side), side.other())
    }

    /// Returns `true` if the given color is in check with no legal move
    pub fn is_checkmate(&self, state: &BoardState, side: Color) -> bool {
        self.is_in_check(state, side) && !self.has_legal_move(state, side)
    }

    /// Returns `true` if the given color isn't in check but has no legal move
    pub fn is_stalemate(&self, state: &BoardState, side: Color) -> bool {
        !self.is_in_check(state, side) && !self.has_legal_move(state, side)
    }
}
