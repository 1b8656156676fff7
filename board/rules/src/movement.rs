//! Where each kind of piece can move, ignoring whether that leaves its own king in check
//!
//! The set of piece kinds is closed, so dispatch is a single `match` in [`geometric_moves`]
//! rather than anything dynamic.

use board::{
    Color, Piece, PieceKind, Square, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};

use crate::{
    attacks::is_attacked,
    castling::{king_home, Wing},
    BoardState, SquareSet,
};

/// The squares the piece at `at` could move to by its own movement rule
///
/// Guarantees:
///  * Only squares on the board are returned, and never `at` itself.
///  * No square holding a piece of the mover's own color is returned.
///  * Sliding pieces stop at the first occupied square, including it only if it can be captured.
///  * Whether the mover's king ends up in check is not considered at all.
///
/// Returns the empty set if there's no piece at `at`.
pub fn geometric_moves(state: &BoardState, at: Square) -> SquareSet {
    let Some(piece) = state.board.get(at) else {
        return SquareSet::empty();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(state, at, piece.color),
        PieceKind::Rook => sliding_moves(state, at, piece.color, &ROOK_DIRECTIONS),
        PieceKind::Knight => step_moves(state, at, piece.color, &KNIGHT_OFFSETS),
        PieceKind::Bishop => sliding_moves(state, at, piece.color, &BISHOP_DIRECTIONS),
        PieceKind::Queen => sliding_moves(state, at, piece.color, &QUEEN_DIRECTIONS),
        PieceKind::King => {
            step_moves(state, at, piece.color, &KING_OFFSETS) | castling_moves(state, at)
        }
    }
}

fn sliding_moves(
    state: &BoardState,
    at: Square,
    color: Color,
    directions: &[(i8, i8)],
) -> SquareSet {
    directions
        .iter()
        .flat_map(|&direction| state.board.ray(at, direction))
        .filter(|&square| !state.board.is_color(square, color))
        .collect()
}

fn step_moves(state: &BoardState, at: Square, color: Color, offsets: &[(i8, i8)]) -> SquareSet {
    offsets
        .iter()
        .map(|&(rank, file)| at.offset(rank, file))
        .filter(|&square| square.is_valid() && !state.board.is_color(square, color))
        .collect()
}

fn pawn_moves(state: &BoardState, at: Square, color: Color) -> SquareSet {
    let direction = color.pawn_direction();
    let mut moves = SquareSet::empty();

    let single = at.offset(direction, 0);
    if single.is_valid() && state.board.is_vacant(single) {
        moves.insert(single);
        let double = single.offset(direction, 0);
        if at.rank() == color.pawn_rank() && state.board.is_vacant(double) {
            moves.insert(double);
        }
    }

    for file in [-1, 1] {
        let target = at.offset(direction, file);
        if state.board.is_color(target, color.other()) || is_en_passant_capture(state, at, target)
        {
            moves.insert(target);
        }
    }
    moves
}

/// Whether a pawn of the side to move on `at` could take en passant by moving to `target`
///
/// That needs `target` to be this turn's en passant square, and an enemy pawn to be standing
/// right beside `at` on the target's file, which is the pawn that just went past.
fn is_en_passant_capture(state: &BoardState, at: Square, target: Square) -> bool {
    let Some(pawn) = state.board.get(at) else {
        return false;
    };
    let passed = Square::new(at.rank(), target.file());
    pawn.kind == PieceKind::Pawn
        && pawn.color == state.side_to_move
        && state.en_passant_target == Some(target)
        && state.board.is_vacant(target)
        && state.board.get(passed) == Some(Piece::new(PieceKind::Pawn, pawn.color.other()))
}

/// The castling squares available to the king on `at`, at most one per wing
///
/// Each castle needs all of:
///  1. The right for that wing still being held.
///  2. The king on its home square and the wing's rook on its home square, with every square
///     between them empty.
///  3. The king not in check, and neither the square it passes over nor the square it lands on
///     attacked. Each of those is checked by putting the king there on a copy of the board and
///     asking the attack detector, so pieces that would see through the king's old square count.
pub fn castling_moves(state: &BoardState, at: Square) -> SquareSet {
    let Some(king) = state.board.get(at) else {
        return SquareSet::empty();
    };
    if king.kind != PieceKind::King || at != king_home(king.color) {
        return SquareSet::empty();
    }
    let enemy = king.color.other();
    if is_attacked(&state.board, at, enemy) {
        return SquareSet::empty();
    }
    Wing::BOTH
        .into_iter()
        .filter(|&wing| state.castles.allows(king.color, wing))
        .filter(|&wing| {
            let rook_home = wing.rook_home(king.color);
            state.board.get(rook_home) == Some(Piece::new(PieceKind::Rook, king.color))
                && state.board.is_path_clear(at, rook_home)
        })
        .filter(|&wing| {
            let landing = wing.king_target(king.color);
            let passing = wing.rook_target(king.color);
            [passing, landing].into_iter().all(|square| {
                let mut scratch = state.board;
                scratch.take(at);
                scratch.set(square, Some(king));
                !is_attacked(&scratch, square, enemy)
            })
        })
        .map(|wing| wing.king_target(king.color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{Board, CastleRights};

    fn state_with(pieces: &[(Square, PieceKind, Color)], side_to_move: Color) -> BoardState {
        let mut board = Board::EMPTY;
        for &(square, kind, color) in pieces {
            board.set(square, Some(Piece::new(kind, color)));
        }
        BoardState::from_board(board, side_to_move).expect("test board needs both kings")
    }

    fn squares(list: &[Square]) -> SquareSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_initial_moves() {
        let state = BoardState::INITIAL;
        assert_eq!(
            geometric_moves(&state, Square::E2),
            squares(&[Square::E3, Square::E4])
        );
        assert_eq!(
            geometric_moves(&state, Square::G1),
            squares(&[Square::F3, Square::H3])
        );
        for blocked in [Square::A1, Square::C1, Square::D1, Square::E1] {
            assert!(geometric_moves(&state, blocked).is_empty(), "{blocked}");
        }
        assert!(geometric_moves(&state, Square::E4).is_empty());
        assert!(geometric_moves(&state, Square::INVALID).is_empty());
    }

    #[test]
    fn test_slider_includes_capture_and_stops() {
        let state = state_with(
            &[
                (Square::A1, PieceKind::King, Color::White),
                (Square::H8, PieceKind::King, Color::Black),
                (Square::D4, PieceKind::Rook, Color::White),
                (Square::D6, PieceKind::Pawn, Color::Black),
                (Square::F4, PieceKind::Pawn, Color::White),
            ],
            Color::White,
        );
        assert_eq!(
            geometric_moves(&state, Square::D4),
            squares(&[
                Square::D5,
                Square::D6,
                Square::D3,
                Square::D2,
                Square::D1,
                Square::E4,
                Square::C4,
                Square::B4,
                Square::A4,
            ])
        );
    }

    #[test]
    fn test_queen_in_corner() {
        let state = state_with(
            &[
                (Square::E1, PieceKind::King, Color::White),
                (Square::E8, PieceKind::King, Color::Black),
                (Square::A1, PieceKind::Queen, Color::White),
            ],
            Color::White,
        );
        // 7 up the file, 7 along the diagonal, b1 through d1 before the king
        assert_eq!(geometric_moves(&state, Square::A1).len(), 17);
    }

    #[test]
    fn test_pawn_double_push_needs_both_squares() {
        let mut state = BoardState::INITIAL;
        state.board.set(Square::E4, Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert_eq!(
            geometric_moves(&state, Square::E2),
            squares(&[Square::E3])
        );
        state.board.set(Square::E3, Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert!(geometric_moves(&state, Square::E2).is_empty());
        // Pawns don't capture forwards, but the knight on d3 is fair game
        state.board.set(Square::D3, Some(Piece::new(PieceKind::Knight, Color::Black)));
        assert_eq!(
            geometric_moves(&state, Square::E2),
            squares(&[Square::D3])
        );
    }

    #[test]
    fn test_en_passant_needs_the_passed_pawn() {
        let mut state = state_with(
            &[
                (Square::E1, PieceKind::King, Color::White),
                (Square::E8, PieceKind::King, Color::Black),
                (Square::E5, PieceKind::Pawn, Color::White),
                (Square::D5, PieceKind::Pawn, Color::Black),
            ],
            Color::White,
        );
        state.en_passant_target = Some(Square::D6);
        assert_eq!(
            geometric_moves(&state, Square::E5),
            squares(&[Square::E6, Square::D6])
        );
        // An empty diagonal on its own isn't enough
        state.board.take(Square::D5);
        assert_eq!(
            geometric_moves(&state, Square::E5),
            squares(&[Square::E6])
        );
    }

    #[test]
    fn test_castling_preconditions() {
        let mut state = state_with(
            &[
                (Square::E1, PieceKind::King, Color::White),
                (Square::H1, PieceKind::Rook, Color::White),
                (Square::A1, PieceKind::Rook, Color::White),
                (Square::E8, PieceKind::King, Color::Black),
            ],
            Color::White,
        );
        assert!(castling_moves(&state, Square::E1).is_empty(), "no rights yet");

        state.castles = CastleRights::White;
        assert_eq!(
            castling_moves(&state, Square::E1),
            squares(&[Square::G1, Square::C1])
        );

        // Blocked on the queenside, even though b1 is never walked over by the king
        state.board.set(Square::B1, Some(Piece::new(PieceKind::Knight, Color::White)));
        assert_eq!(castling_moves(&state, Square::E1), squares(&[Square::G1]));
        state.board.take(Square::B1);

        // Passing over an attacked square
        state.board.set(Square::F8, Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(castling_moves(&state, Square::E1), squares(&[Square::C1]));
        state.board.take(Square::F8);

        // Landing on an attacked square
        state.board.set(Square::C5, Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert_eq!(castling_moves(&state, Square::E1), squares(&[Square::G1]));
        state.board.take(Square::C5);

        // In check
        state.board.set(Square::E5, Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert!(castling_moves(&state, Square::E1).is_empty());
    }

    #[test]
    fn test_castling_squares_covered_by_short_range_pieces() {
        let mut state = state_with(
            &[
                (Square::E8, PieceKind::King, Color::Black),
                (Square::H8, PieceKind::Rook, Color::Black),
                (Square::A8, PieceKind::Rook, Color::Black),
                (Square::E1, PieceKind::King, Color::White),
            ],
            Color::Black,
        );
        state.castles = CastleRights::Black;
        assert_eq!(
            castling_moves(&state, Square::E8),
            squares(&[Square::G8, Square::C8])
        );
        // A knight on e6 covers both d8 and f8
        state.board.set(Square::E6, Some(Piece::new(PieceKind::Knight, Color::White)));
        assert!(castling_moves(&state, Square::E8).is_empty());
        state.board.take(Square::E6);
        // A pawn on h7 covers g8, and nothing else on the back rank
        state.board.set(Square::H7, Some(Piece::new(PieceKind::Pawn, Color::White)));
        assert_eq!(castling_moves(&state, Square::E8), squares(&[Square::C8]));
        // A rook that isn't home doesn't count, whatever the rights say
        state.board.take(Square::A8);
        state.board.set(Square::A7, Some(Piece::new(PieceKind::Rook, Color::Black)));
        assert!(castling_moves(&state, Square::E8).is_empty());
    }
}
