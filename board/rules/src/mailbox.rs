use core::fmt;

use board::{Color, Piece, PieceKind, Square};

use crate::SquareSet;

/// The pieces on the back rank at the start of the game, from the a-file to the h-file
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The 8×8 grid of squares, each of which may hold a piece
///
/// Squares off the board can be asked about and written to freely: they hold nothing and writes
/// to them do nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it
    pub const EMPTY: Self = Self {
        squares: [None; 64],
    };

    /// The layout at the start of a chess game
    pub const INITIAL: Self = {
        let mut squares = [None; 64];
        let mut file = 0;
        while file < 8 {
            squares[file] = Some(Piece::new(BACK_RANK[file], Color::White));
            squares[8 + file] = Some(Piece::new(PieceKind::Pawn, Color::White));
            squares[48 + file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            squares[56 + file] = Some(Piece::new(BACK_RANK[file], Color::Black));
            file += 1;
        }
        Self { squares }
    };

    /// Find the piece, if any, at the given square
    ///
    /// Returns `None` if the given square is off the board.
    pub const fn get(&self, square: Square) -> Option<Piece> {
        match square.index() {
            Some(index) => self.squares[index],
            None => None,
        }
    }

    /// Put the given piece (or nothing) on the square, returning what was there before
    ///
    /// Does nothing and returns `None` if the square is off the board.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        match square.index() {
            Some(index) => core::mem::replace(&mut self.squares[index], piece),
            None => None,
        }
    }

    /// Remove whatever is on the square, returning it
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.set(square, None)
    }

    /// Returns true if no piece is on the square (which includes squares off the board)
    pub const fn is_vacant(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Returns true if a piece of the given color is on the square
    pub fn is_color(&self, square: Square, color: Color) -> bool {
        self.get(square).is_some_and(|piece| piece.color == color)
    }

    /// Iterate over every piece on the board along with its square, from a1 to h8
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, piece)| piece.map(|piece| (Square::from_index(index), piece)))
    }

    /// Iterate over the pieces of one color
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// All the squares holding a piece of either color
    pub fn occupied(&self) -> SquareSet {
        self.pieces().map(|(square, _)| square).collect()
    }

    /// Find the square of the given side's king
    ///
    /// If there's more than one, this finds the one nearest a1.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.pieces()
            .find(|&(_, piece)| piece == king)
            .map(|(square, _)| square)
    }

    /// Returns true if every square strictly between `from` and `to` is empty
    ///
    /// The two squares must share a rank, file or diagonal; for any other pair (or either square
    /// being off the board) this returns `false`, since there is no straight path. Adjacent squares
    /// trivially have a clear path.
    ///
    /// ```
    /// use board::Square;
    /// use rules::Board;
    /// assert!(!Board::INITIAL.is_path_clear(Square::A1, Square::A8));
    /// assert!(Board::INITIAL.is_path_clear(Square::A2, Square::A7));
    /// assert!(Board::INITIAL.is_path_clear(Square::C2, Square::H7));
    /// assert!(!Board::INITIAL.is_path_clear(Square::B1, Square::C3));
    /// ```
    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        if !from.is_valid() || !to.is_valid() || from == to || !from.is_aligned_with(to) {
            return false;
        }
        let (rank, file) = from.delta_to(to);
        let step = (rank.signum(), file.signum());
        let mut square = from.offset(step.0, step.1);
        while square != to {
            if !self.is_vacant(square) {
                return false;
            }
            square = square.offset(step.0, step.1);
        }
        true
    }

    /// Iterate from one square past `from` in the given direction until (and including) the
    /// first occupied square or the edge of the board
    pub fn ray(&self, from: Square, direction: (i8, i8)) -> impl Iterator<Item = Square> + '_ {
        let mut next = Some(from.offset(direction.0, direction.1));
        core::iter::from_fn(move || {
            let square = next.take().filter(|square| square.is_valid())?;
            if self.is_vacant(square) {
                next = Some(square.offset(direction.0, direction.1));
            }
            Some(square)
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board {{\n{self}}}")
    }
}
/// Display as a grid of FEN letters, rank 8 at the top
///
/// ```
/// use rules::Board;
///
/// assert_eq!(
///     Board::INITIAL.to_string(),
///     "rnbqkbnr\npppppppp\n........\n........\n........\n........\nPPPPPPPP\nRNBQKBNR\n",
/// );
/// ```
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for rank in (0..8).rev() {
            for file in 0..8 {
                f.write_char(
                    self.get(Square::new(rank, file))
                        .map_or('.', Piece::fen_letter),
                )?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
