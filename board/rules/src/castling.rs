use board::{Color, Piece, PieceKind, Square};

bitflags::bitflags! {
    /// Which castles are still allowed (the king and rook haven't moved yet)
    ///
    /// These castles aren't necessarily legal right now, as it may be blocked by intervening
    /// pieces and/or checks. Bits are only ever removed over the course of a game.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CastleRights: u8 {
        const WhiteKingside = 0b0000_0001;
        const WhiteQueenside = 0b0000_0010;
        /// A mask for whether white can castle in either direction
        const White = 0b0000_0011;
        const BlackKingside = 0b0000_0100;
        const BlackQueenside = 0b0000_1000;
        /// A mask for whether black can castle in either direction
        const Black = 0b0000_1100;
    }
}

/// The side of the board a castle happens on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wing {
    Kingside,
    Queenside,
}

impl Wing {
    pub const BOTH: [Wing; 2] = [Wing::Kingside, Wing::Queenside];

    /// The file the king lands on, two files from where it started
    pub const fn king_target_file(self) -> i8 {
        match self {
            Wing::Kingside => 6,
            Wing::Queenside => 2,
        }
    }

    /// The file this wing's rook starts on
    pub const fn rook_home_file(self) -> i8 {
        match self {
            Wing::Kingside => 7,
            Wing::Queenside => 0,
        }
    }

    /// The file this wing's rook lands on, the square the king passed over
    pub const fn rook_target_file(self) -> i8 {
        match self {
            Wing::Kingside => 5,
            Wing::Queenside => 3,
        }
    }

    /// Which wing a king move lands on, if it moves two files along its home rank from its home
    /// square
    pub fn of_king_move(color: Color, source: Square, target: Square) -> Option<Self> {
        if source != king_home(color) || target.rank() != color.home_rank() {
            return None;
        }
        Self::BOTH
            .into_iter()
            .find(|wing| target.file() == wing.king_target_file())
    }

    /// Which wing's rook starts on the given square, for the given side
    pub fn of_rook_home(color: Color, square: Square) -> Option<Self> {
        Self::BOTH
            .into_iter()
            .find(|wing| square == wing.rook_home(color))
    }

    pub const fn king_target(self, color: Color) -> Square {
        Square::new(color.home_rank(), self.king_target_file())
    }

    pub const fn rook_home(self, color: Color) -> Square {
        Square::new(color.home_rank(), self.rook_home_file())
    }

    pub const fn rook_target(self, color: Color) -> Square {
        Square::new(color.home_rank(), self.rook_target_file())
    }
}

/// The square each side's king starts the game on
pub const fn king_home(color: Color) -> Square {
    Square::new(color.home_rank(), 4)
}

impl CastleRights {
    /// The right for one side to castle on one wing
    pub const fn single(color: Color, wing: Wing) -> Self {
        match (color, wing) {
            (Color::White, Wing::Kingside) => Self::WhiteKingside,
            (Color::White, Wing::Queenside) => Self::WhiteQueenside,
            (Color::Black, Wing::Kingside) => Self::BlackKingside,
            (Color::Black, Wing::Queenside) => Self::BlackQueenside,
        }
    }

    /// Both rights of one side
    pub const fn side(color: Color) -> Self {
        match color {
            Color::White => Self::White,
            Color::Black => Self::Black,
        }
    }

    /// Whether the given side may still castle on the given wing
    pub fn allows(self, color: Color, wing: Wing) -> bool {
        self.contains(Self::single(color, wing))
    }

    /// The rights left after the given piece leaves `source`
    ///
    /// A king moving loses both of its side's rights, and a rook leaving its home square loses
    /// the right for that wing.
    pub fn after_move(self, piece: Piece, source: Square) -> Self {
        match piece.kind {
            PieceKind::King => self.difference(Self::side(piece.color)),
            PieceKind::Rook => match Wing::of_rook_home(piece.color, source) {
                Some(wing) => self.difference(Self::single(piece.color, wing)),
                None => self,
            },
            _ => self,
        }
    }

    /// The rights left after the given piece is captured on `square`
    ///
    /// Only a rook taken on its home square takes a right with it.
    pub fn after_capture(self, captured: Piece, square: Square) -> Self {
        if captured.kind != PieceKind::Rook {
            return self;
        }
        match Wing::of_rook_home(captured.color, square) {
            Some(wing) => self.difference(Self::single(captured.color, wing)),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_move_clears_both_wings() {
        let rights = CastleRights::all()
            .after_move(Piece::new(PieceKind::King, Color::White), Square::E1);
        assert_eq!(rights, CastleRights::Black);
    }

    #[test]
    fn test_rook_move_clears_own_wing() {
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let rights = CastleRights::all().after_move(rook, Square::H8);
        assert!(!rights.allows(Color::Black, Wing::Kingside));
        assert!(rights.allows(Color::Black, Wing::Queenside));
        // A rook that has already left home changes nothing
        assert_eq!(rights.after_move(rook, Square::H5), rights);
    }

    #[test]
    fn test_captured_rook_clears_its_wing() {
        let rook = Piece::new(PieceKind::Rook, Color::White);
        let rights = CastleRights::all().after_capture(rook, Square::A1);
        assert_eq!(
            rights,
            CastleRights::all().difference(CastleRights::WhiteQueenside)
        );
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert_eq!(
            CastleRights::all().after_capture(knight, Square::H1),
            CastleRights::all()
        );
    }

    #[test]
    fn test_wing_geometry() {
        assert_eq!(
            Wing::of_king_move(Color::White, Square::E1, Square::G1),
            Some(Wing::Kingside)
        );
        assert_eq!(
            Wing::of_king_move(Color::Black, Square::E8, Square::C8),
            Some(Wing::Queenside)
        );
        assert_eq!(Wing::of_king_move(Color::White, Square::E1, Square::F1), None);
        assert_eq!(Wing::of_king_move(Color::White, Square::E2, Square::G2), None);
        assert_eq!(Wing::Kingside.rook_target(Color::White), Square::F1);
        assert_eq!(Wing::Queenside.rook_home(Color::Black), Square::A8);
    }
}
