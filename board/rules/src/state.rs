use board::{Color, Piece, PieceKind, Square};

use crate::{attacks::is_attacked, castling::Wing, Board, CastleRights, MoveRecord, PositionError};

/// Everything about a position that the rules need to look at
///
/// This is cheap to copy, which is how "what if" questions get answered: copy it, make the move
/// on the copy, and look at the result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardState {
    // piece placement
    pub board: Board,
    /// Where white's king is, always in agreement with `board`
    pub white_king: Square,
    /// Where black's king is, always in agreement with `board`
    pub black_king: Square,

    // flags
    pub side_to_move: Color,
    /// What castles are allowed, given the history of moves
    pub castles: CastleRights,
    /// The square a pawn just skipped over by advancing two ranks, which an enemy pawn may
    /// capture onto this turn only
    pub en_passant_target: Option<Square>,

    // clocks
    /// Number of half-moves since a pawn was moved or a piece was captured
    pub halfmove_clock: u16,
    /// Starts at 1 and goes up after every move by black
    pub fullmove_number: u16,
}

/// The details of a move figured out while making it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveEffects {
    /// The piece that moved, as it was before any promotion
    pub piece: Piece,
    /// The piece taken, and the square it was taken on
    ///
    /// For en passant that square is beside the target square rather than on it.
    pub captured: Option<(Piece, Square)>,
    /// Set if this was a king castling, with the rook moved alongside it
    pub castle: Option<Wing>,
    pub is_en_passant: bool,
    pub promotion: Option<PieceKind>,
}

impl BoardState {
    /// The state at the start of a chess game
    pub const INITIAL: Self = Self {
        board: Board::INITIAL,
        white_king: Square::E1,
        black_king: Square::E8,
        side_to_move: Color::White,
        castles: CastleRights::all(),
        en_passant_target: None,
        halfmove_clock: 0,
        fullmove_number: 1,
    };

    /// Wrap a hand-built board, with no castling or en passant available
    ///
    /// Fails unless each side has exactly one king and the side not to move isn't in check.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, PositionError> {
        let state = Self {
            white_king: board
                .find_king(Color::White)
                .ok_or(PositionError::KingCount(Color::White))?,
            black_king: board
                .find_king(Color::Black)
                .ok_or(PositionError::KingCount(Color::Black))?,
            board,
            side_to_move,
            castles: CastleRights::empty(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };
        state.validate()?;
        Ok(state)
    }

    /// Check that play can go on from this position
    ///
    /// Each side needs exactly one king, on the square recorded for it, and the side that just
    /// moved can't have been left in check. The rest of this crate takes all of that for granted.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in [Color::White, Color::Black] {
            let king = Piece::new(PieceKind::King, color);
            if self.board.pieces_of(color).filter(|&(_, piece)| piece == king).count() != 1 {
                return Err(PositionError::KingCount(color));
            }
            if self.board.get(self.king_square(color)) != Some(king) {
                return Err(PositionError::KingMisplaced(color));
            }
        }
        let waiting = self.side_to_move.other();
        if is_attacked(&self.board, self.king_square(waiting), self.side_to_move) {
            return Err(PositionError::OpponentInCheck(waiting));
        }
        Ok(())
    }

    /// Get the square on which the given player's king resides
    pub const fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    fn set_king_square(&mut self, color: Color, square: Square) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }

    /// Returns true if this is a pawn capturing en passant
    ///
    /// This only looks at the shape of the move, not whether it's otherwise legal.
    pub fn is_en_passant(&self, piece: Piece, source: Square, target: Square) -> bool {
        piece.kind == PieceKind::Pawn
            && self.en_passant_target == Some(target)
            && source.file() != target.file()
            && self.board.is_vacant(target)
    }

    /// Move the pieces on the board for this move, including the rook of a castle and the pawn
    /// taken en passant, and keep the king squares up to date
    ///
    /// None of the flags or clocks change. Returns `None` (having done nothing) if there's no
    /// piece at `source`.
    pub fn relocate(
        &mut self,
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> Option<MoveEffects> {
        let piece = self.board.get(source)?;
        let is_en_passant = self.is_en_passant(piece, source, target);
        let castle = match piece.kind {
            PieceKind::King => Wing::of_king_move(piece.color, source, target),
            _ => None,
        };
        let promotion = promotion.filter(|_| piece.kind == PieceKind::Pawn);

        self.board.take(source);
        let captured = if is_en_passant {
            let taken_square = Square::new(source.rank(), target.file());
            self.board.take(taken_square).map(|taken| (taken, taken_square))
        } else {
            self.board.get(target).map(|taken| (taken, target))
        };
        let placed = Piece::new(promotion.unwrap_or(piece.kind), piece.color);
        self.board.set(target, Some(placed));

        if piece.kind == PieceKind::King {
            debug_assert_eq!(self.king_square(piece.color), source, "king cache out of date");
            self.set_king_square(piece.color, target);
        }
        if let Some(wing) = castle {
            let rook = self.board.take(wing.rook_home(piece.color));
            debug_assert_eq!(rook, Some(Piece::new(PieceKind::Rook, piece.color)));
            self.board.set(wing.rook_target(piece.color), rook);
        }

        Some(MoveEffects {
            piece,
            captured,
            castle,
            is_en_passant,
            promotion,
        })
    }

    /// Play the move on this state: move the pieces, then update castling rights, the en passant
    /// target, the clocks and whose turn it is
    ///
    /// This does no legality checking at all; that's the rule engine's job. Returns `None`
    /// (having done nothing) if there's no piece at `source`.
    pub fn make_move(
        &mut self,
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> Option<MoveEffects> {
        let effects = self.relocate(source, target, promotion)?;
        let mover = effects.piece;

        self.castles = self.castles.after_move(mover, source);
        if let Some((taken, square)) = effects.captured {
            self.castles = self.castles.after_capture(taken, square);
        }

        self.en_passant_target = None;
        if mover.kind == PieceKind::Pawn && source.rank().abs_diff(target.rank()) == 2 {
            self.en_passant_target = Some(Square::new(
                (source.rank() + target.rank()) / 2,
                source.file(),
            ));
        }

        if mover.kind == PieceKind::Pawn || effects.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover.color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = mover.color.other();
        Some(effects)
    }

    /// Take back the given move, which must be the last one made on this state
    ///
    /// Castling rights, the en passant target and the clocks come back from the record rather
    /// than being worked out again, since the board alone can't say what they were.
    pub fn unmake_move(&mut self, record: &MoveRecord) {
        let color = record.color();
        let placed = self.board.take(record.target);
        debug_assert_eq!(
            placed,
            Some(record.placed_piece()),
            "undoing a move that isn't on the board"
        );
        self.board.set(record.source, Some(record.piece));
        if let Some((taken, square)) = record.captured {
            self.board.set(square, Some(taken));
        }
        if let Some(wing) = record.castle {
            let rook = self.board.take(wing.rook_target(color));
            self.board.set(wing.rook_home(color), rook);
        }
        if record.piece.kind == PieceKind::King {
            self.set_king_square(color, record.source);
        }

        self.side_to_move = color;
        self.castles = record.prior_castles;
        self.en_passant_target = record.prior_en_passant;
        self.halfmove_clock = record.prior_halfmove_clock;
        self.fullmove_number = record.prior_fullmove_number;
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_kings_match_board() {
        let state = BoardState::INITIAL;
        for color in [Color::White, Color::Black] {
            assert_eq!(Some(state.king_square(color)), state.board.find_king(color));
        }
        assert_eq!(
            BoardState::from_board(Board::INITIAL, Color::White)
                .map(|state| (state.white_king, state.black_king)),
            Ok((Square::E1, Square::E8))
        );
    }

    #[test]
    fn test_from_board_requires_one_king_each() {
        assert_eq!(
            BoardState::from_board(Board::EMPTY, Color::White),
            Err(PositionError::KingCount(Color::White))
        );
        let mut board = Board::EMPTY;
        board.set(Square::A1, Some(Piece::new(PieceKind::King, Color::White)));
        board.set(Square::H1, Some(Piece::new(PieceKind::King, Color::White)));
        board.set(Square::A8, Some(Piece::new(PieceKind::King, Color::Black)));
        assert_eq!(
            BoardState::from_board(board, Color::White),
            Err(PositionError::KingCount(Color::White))
        );
    }

    #[test]
    fn test_from_board_rejects_waiting_side_in_check() {
        let mut board = Board::EMPTY;
        board.set(Square::A1, Some(Piece::new(PieceKind::King, Color::White)));
        board.set(Square::E8, Some(Piece::new(PieceKind::King, Color::Black)));
        board.set(Square::E7, Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(
            BoardState::from_board(board, Color::White),
            Err(PositionError::OpponentInCheck(Color::Black))
        );
        // With black to move it's just check
        assert!(BoardState::from_board(board, Color::Black).is_ok());
    }

    #[test]
    fn test_validate_catches_stale_king_square() {
        let mut state = BoardState::INITIAL;
        assert_eq!(state.validate(), Ok(()));
        state.white_king = Square::A1;
        assert_eq!(
            state.validate(),
            Err(PositionError::KingMisplaced(Color::White))
        );
        state.white_king = Square::E1;
        state.board.take(Square::E8);
        assert_eq!(
            state.validate(),
            Err(PositionError::KingCount(Color::Black))
        );
    }

    #[test]
    fn test_double_push_sets_en_passant_target() {
        let mut state = BoardState::INITIAL;
        let effects = state.make_move(Square::E2, Square::E4, None).unwrap();
        assert_eq!(effects.captured, None);
        assert_eq!(state.en_passant_target, Some(Square::E3));
        assert_eq!(state.side_to_move, Color::Black);
        state.make_move(Square::G8, Square::F6, None).unwrap();
        assert_eq!(state.en_passant_target, None);
        assert_eq!(state.halfmove_clock, 1);
        assert_eq!(state.fullmove_number, 2);
    }

    #[test]
    fn test_en_passant_removes_the_passed_pawn() {
        let mut state = BoardState::INITIAL;
        for (source, target) in [
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ] {
            state.make_move(source, target, None).unwrap();
        }
        let effects = state.make_move(Square::E5, Square::D6, None).unwrap();
        assert!(effects.is_en_passant);
        assert_eq!(
            effects.captured,
            Some((Piece::new(PieceKind::Pawn, Color::Black), Square::D5))
        );
        assert_eq!(state.board.get(Square::D5), None);
    }

    #[test]
    fn test_castle_moves_the_rook() {
        let mut board = Board::EMPTY;
        board.set(Square::E1, Some(Piece::new(PieceKind::King, Color::White)));
        board.set(Square::A1, Some(Piece::new(PieceKind::Rook, Color::White)));
        board.set(Square::E8, Some(Piece::new(PieceKind::King, Color::Black)));
        let mut state = BoardState::from_board(board, Color::White).unwrap();
        state.castles = CastleRights::all();
        let effects = state.make_move(Square::E1, Square::C1, None).unwrap();
        assert_eq!(effects.castle, Some(Wing::Queenside));
        assert_eq!(
            state.board.get(Square::D1),
            Some(Piece::new(PieceKind::Rook, Color::White))
        );
        assert_eq!(state.board.get(Square::A1), None);
        assert_eq!(state.white_king, Square::C1);
        assert_eq!(state.castles, CastleRights::Black);
    }

    #[test]
    fn test_no_piece_is_a_no_op() {
        let mut state = BoardState::INITIAL;
        assert_eq!(state.make_move(Square::E4, Square::E5, None), None);
        assert_eq!(state, BoardState::INITIAL);
    }
}
