//! Reading and writing positions in Forsyth-Edwards notation

use board::{Color, Piece, Square};

use crate::{Board, BoardState, CastleRights, FenError};

const CASTLE_LETTERS: [(CastleRights, char); 4] = [
    (CastleRights::WhiteKingside, 'K'),
    (CastleRights::WhiteQueenside, 'Q'),
    (CastleRights::BlackKingside, 'k'),
    (CastleRights::BlackQueenside, 'q'),
];

impl BoardState {
    /// Parse a position from the given FEN
    ///
    /// ```
    /// use board::{Color, Square};
    /// use rules::BoardState;
    ///
    /// let state = BoardState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
    /// assert_eq!(state.side_to_move, Color::Black);
    /// assert_eq!(state.en_passant_target, Some(Square::E3));
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields = fen.split_whitespace().collect::<Vec<_>>();
        let &[placement, side, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(FenError::FieldCount(fields.len()));
        };

        let board = parse_placement(placement)?;
        let side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::SideToMove(side.to_string())),
        };
        let mut state = BoardState::from_board(board, side_to_move)?;
        state.castles = parse_castling(castling)?;
        state.en_passant_target = match en_passant {
            "-" => None,
            name => {
                let square = name
                    .parse::<Square>()
                    .map_err(|_| FenError::EnPassant(name.to_string()))?;
                // Only the square a pawn just skipped over makes sense here
                let mover = side_to_move.other();
                if square.rank() != mover.pawn_rank() + mover.pawn_direction() {
                    return Err(FenError::EnPassant(name.to_string()));
                }
                Some(square)
            }
        };
        state.halfmove_clock = halfmove
            .parse()
            .map_err(|_| FenError::Counter(halfmove.to_string()))?;
        state.fullmove_number = match fullmove.parse() {
            Ok(0) | Err(_) => return Err(FenError::Counter(fullmove.to_string())),
            Ok(number) => number,
        };
        Ok(state)
    }

    /// Convert to a FEN string
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.board.get(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.extend(char::from_digit(empty, 10));
                            empty = 0;
                        }
                        fen.push(piece.fen_letter());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.extend(char::from_digit(empty, 10));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let castles = CASTLE_LETTERS
            .into_iter()
            .filter(|&(right, _)| self.castles.contains(right))
            .map(|(_, letter)| letter)
            .collect::<String>();
        if castles.is_empty() {
            fen.push('-');
        } else {
            fen.push_str(&castles);
        }

        fen.push(' ');
        match self.en_passant_target {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }
        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock, self.fullmove_number
        ));
        fen
    }
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let bad = || FenError::Placement(placement.to_string());
    let rows = placement.split('/').collect::<Vec<_>>();
    if rows.len() != 8 {
        return Err(bad());
    }
    let mut board = Board::EMPTY;
    for (row, rank) in rows.into_iter().zip((0..8).rev()) {
        let mut file = 0;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(bad());
                }
                file += skip as i8;
            } else {
                let piece = Piece::from_fen_letter(c).ok_or_else(bad)?;
                if file >= 8 {
                    return Err(bad());
                }
                board.set(Square::new(rank, file), Some(piece));
                file += 1;
            }
            if file > 8 {
                return Err(bad());
            }
        }
        if file != 8 {
            return Err(bad());
        }
    }
    Ok(board)
}

fn parse_castling(castling: &str) -> Result<CastleRights, FenError> {
    if castling == "-" {
        return Ok(CastleRights::empty());
    }
    let mut rights = CastleRights::empty();
    // Letters have to come in the usual order, each at most once
    let mut letters = CASTLE_LETTERS.iter();
    for c in castling.chars() {
        loop {
            match letters.next() {
                Some(&(right, letter)) if letter == c => {
                    rights |= right;
                    break;
                }
                Some(_) => continue,
                None => return Err(FenError::Castling(castling.to_string())),
            }
        }
    }
    Ok(rights)
}
