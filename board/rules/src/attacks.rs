//! Deciding whether a square is attacked
//!
//! This is deliberately separate from the move validators: a pawn attacks the squares diagonally
//! in front of it whether or not anything stands there, and a king attacks the squares around it
//! without any of the castling business.

use board::{Color, Piece, PieceKind, Square};

use crate::{Board, SquareSet};

/// True iff `square` is attacked by any piece of color `by`
///
/// Looks at every square holding one of `by`'s pieces and asks whether that piece's raw movement
/// reaches `square`. Whatever occupies `square` itself doesn't matter.
pub fn is_attacked(board: &Board, square: Square, by: Color) -> bool {
    square.is_valid()
        && board
            .pieces_of(by)
            .any(|(from, piece)| piece_attacks(board, piece, from, square))
}

/// Every square holding a piece of color `by` that attacks `square`
pub fn attackers(board: &Board, square: Square, by: Color) -> SquareSet {
    if !square.is_valid() {
        return SquareSet::empty();
    }
    board
        .pieces_of(by)
        .filter(|&(from, piece)| piece_attacks(board, piece, from, square))
        .map(|(from, _)| from)
        .collect()
}

/// Whether `piece`, standing on `from`, attacks `target`
///
/// Sliding pieces need the squares in between to be empty; nothing else cares what's in the way.
pub fn piece_attacks(board: &Board, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }
    let (rank, file) = from.delta_to(target);
    let (rank_dist, file_dist) = (rank.unsigned_abs(), file.unsigned_abs());
    match piece.kind {
        PieceKind::Pawn => rank == piece.color.pawn_direction() && file_dist == 1,
        PieceKind::Knight => (rank_dist, file_dist) == (1, 2) || (rank_dist, file_dist) == (2, 1),
        PieceKind::King => rank_dist <= 1 && file_dist <= 1,
        PieceKind::Rook => (rank == 0 || file == 0) && board.is_path_clear(from, target),
        PieceKind::Bishop => rank_dist == file_dist && board.is_path_clear(from, target),
        PieceKind::Queen => from.is_aligned_with(target) && board.is_path_clear(from, target),
    }
}
