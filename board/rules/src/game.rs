use board::{CheckStatus, Color, LongAlgebraicNotationMove, Piece, PieceKind, Square};

use crate::{
    Board, BoardState, CastleRights, FenError, GameStatus, IllegalMove, MoveClass, MoveError,
    MoveHistory, MoveRecord, PositionError, Result, RuleEngine, SquareSet,
};

/// A pawn move onto the last rank, waiting on which piece it becomes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PendingPromotion {
    pub source: Square,
    pub target: Square,
}

/// A game of chess, from the first move to the current position
///
/// This owns the board and is the only thing that changes it. Every move goes through the
/// [`RuleEngine`] first, and every move made can be taken back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    state: BoardState,
    status: GameStatus,
    /// Whether the side to move is in check
    in_check: bool,
    history: MoveHistory,
    /// Every piece taken so far, in the order they were taken
    captured: Vec<Piece>,
    selected: Option<Square>,
    pending_promotion: Option<PendingPromotion>,
}

impl GameState {
    /// A game at the standard starting position, with white to move
    pub fn new() -> Self {
        Self::start(BoardState::INITIAL)
    }

    /// Start a game from the given position
    ///
    /// The status is worked out from the position, so this can start a game that's already
    /// over. Fails if the position is one no game could be in, see [`BoardState::validate`].
    pub fn from_state(state: BoardState) -> core::result::Result<Self, PositionError> {
        state.validate()?;
        Ok(Self::start(state))
    }

    /// Start a game from a position written in Forsyth-Edwards notation
    pub fn from_fen(fen: &str) -> core::result::Result<Self, FenError> {
        BoardState::from_fen(fen).map(Self::start)
    }

    fn start(state: BoardState) -> Self {
        let mut game = Self {
            state,
            status: GameStatus::InProgress,
            in_check: false,
            history: MoveHistory::new(),
            captured: Vec::new(),
            selected: None,
            pending_promotion: None,
        };
        game.update_status();
        game
    }

    pub fn to_fen(&self) -> String {
        self.state.to_fen()
    }

    /// Throw away this game and set up the starting position again
    pub fn new_game(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn castle_rights(&self) -> CastleRights {
        self.state.castles
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.state.en_passant_target
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.state.king_square(color)
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.state.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.state.fullmove_number
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// The pieces taken so far, oldest first
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// The most recent move, for anything watching the game
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn selected_square(&self) -> Option<Square> {
        self.selected
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }

    /// Mark a square as selected. This has no bearing on the rules.
    ///
    /// Selecting a square off the board clears the selection.
    pub fn select_square(&mut self, square: Square) {
        self.selected = square.is_valid().then_some(square);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Returns `true` if the given side's king is attacked
    pub fn is_in_check(&self, side: Color) -> bool {
        RuleEngine.is_in_check(&self.state, side)
    }

    /// How a move from `source` to `target` would be treated right now
    ///
    /// On top of the rules themselves, nothing can move once the game is over or while a
    /// promotion is waiting to be finished.
    pub fn classify(&self, source: Square, target: Square) -> MoveClass {
        if self.pending_promotion.is_some() {
            MoveClass::Illegal(IllegalMove::PromotionPending)
        } else if self.is_over() {
            MoveClass::Illegal(IllegalMove::GameOver)
        } else {
            RuleEngine.classify(&self.state, source, target)
        }
    }

    /// Where the piece on `source` can legally move to now
    ///
    /// This is empty unless it's that piece's side to move and the game can go on.
    pub fn legal_destinations(&self, source: Square) -> SquareSet {
        let movable = self.pending_promotion.is_none()
            && !self.is_over()
            && self.state.board.is_color(source, self.state.side_to_move);
        if !movable {
            return SquareSet::empty();
        }
        RuleEngine.legal_moves(&self.state, source)
    }

    /// Every legal move for the side to move, with one entry per piece a pawn could promote into
    pub fn legal_moves(&self) -> Vec<LongAlgebraicNotationMove> {
        let mut moves = Vec::new();
        let side = self.state.side_to_move;
        for (source, piece) in self.state.board.pieces_of(side) {
            for target in self.legal_destinations(source).iter() {
                if piece.kind == PieceKind::Pawn && target.rank() == side.promotion_rank() {
                    moves.extend(PieceKind::PROMOTIONS.into_iter().map(|kind| {
                        LongAlgebraicNotationMove::new(source, target, Some(kind))
                    }));
                } else {
                    moves.push(LongAlgebraicNotationMove::new(source, target, None));
                }
            }
        }
        moves
    }

    /// Try to move the piece on `source` to `target`
    ///
    /// A legal move is made straight away. A pawn reaching the last rank is held as a pending
    /// promotion without touching the board, until [`Self::complete_promotion`] or
    /// [`Self::cancel_promotion`]. Both of those return `true`; an illegal move returns `false`
    /// and changes nothing.
    pub fn attempt_move(&mut self, source: Square, target: Square) -> bool {
        match self.classify(source, target) {
            MoveClass::Legal => self.commit(source, target, None).is_ok(),
            MoveClass::RequiresPromotion(_) => {
                self.pending_promotion = Some(PendingPromotion { source, target });
                true
            }
            MoveClass::Illegal(_) => false,
        }
    }

    /// Finish the pending promotion by turning the pawn into the given kind of piece
    ///
    /// Returns `false` with nothing changed if no promotion is pending or if a pawn can't become
    /// that kind of piece.
    pub fn complete_promotion(&mut self, kind: PieceKind) -> bool {
        let Some(PendingPromotion { source, target }) = self.pending_promotion else {
            return false;
        };
        if !kind.is_promotable() {
            return false;
        }
        self.pending_promotion = None;
        if self.play(source, target, Some(kind)).is_ok() {
            true
        } else {
            self.pending_promotion = Some(PendingPromotion { source, target });
            false
        }
    }

    /// Forget the pending promotion, if there is one; the pawn stays where it was
    pub fn cancel_promotion(&mut self) {
        self.pending_promotion = None;
    }

    /// Make the given move, if it's legal
    ///
    /// A pawn reaching the last rank must be given the piece it becomes, and no other move may
    /// name one.
    pub fn play(
        &mut self,
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> Result<&MoveRecord> {
        match (self.classify(source, target), promotion) {
            (MoveClass::Illegal(reason), _) => Err(reason.into()),
            (MoveClass::RequiresPromotion(_), None) => Err(MoveError::MissingPromotion),
            (MoveClass::RequiresPromotion(kinds), Some(kind)) if !kinds.contains(&kind) => {
                Err(MoveError::InvalidPromotion(kind))
            }
            (MoveClass::Legal, Some(kind)) => Err(MoveError::InvalidPromotion(kind)),
            (MoveClass::Legal | MoveClass::RequiresPromotion(_), _) => {
                self.commit(source, target, promotion)
            }
        }
    }

    /// Make the given move if it's legal, returning whether it was
    pub fn execute_move(
        &mut self,
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> bool {
        self.play(source, target, promotion).is_ok()
    }

    /// Make a move written in long algebraic notation, like `e2e4` or `e7e8q`
    ///
    /// Text that doesn't read as a move is an error, and the game is left as it was.
    pub fn apply_long_algebraic(&mut self, text: &str) -> Result<&MoveRecord> {
        let mv = text.parse::<LongAlgebraicNotationMove>()?;
        self.play(mv.source, mv.target, mv.promotion)
    }

    /// Carry out a move already known to be legal
    fn commit(
        &mut self,
        source: Square,
        target: Square,
        promotion: Option<PieceKind>,
    ) -> Result<&MoveRecord> {
        let mut san = self
            .state
            .san_move(source, target, promotion)
            .ok_or(IllegalMove::NoPieceAtSource)?;
        let prior_status = self.status;
        let was_in_check = self.in_check;
        let prior_castles = self.state.castles;
        let prior_en_passant = self.state.en_passant_target;
        let prior_halfmove_clock = self.state.halfmove_clock;
        let prior_fullmove_number = self.state.fullmove_number;

        let effects = self
            .state
            .make_move(source, target, promotion)
            .ok_or(IllegalMove::NoPieceAtSource)?;
        if let Some((taken, _)) = effects.captured {
            self.captured.push(taken);
        }
        self.update_status();
        san.check = match self.status {
            GameStatus::Checkmate(_) => CheckStatus::Checkmate,
            _ if self.in_check => CheckStatus::Check,
            _ => CheckStatus::None,
        };

        self.history.push(MoveRecord {
            sequence: self.history.next_sequence(),
            source,
            target,
            piece: effects.piece,
            captured: effects.captured,
            promotion: effects.promotion,
            castle: effects.castle,
            is_en_passant: effects.is_en_passant,
            san,
            prior_status,
            was_in_check,
            prior_castles,
            prior_en_passant,
            prior_halfmove_clock,
            prior_fullmove_number,
        });
        self.selected = None;
        self.history.last().ok_or(MoveError::Illegal(IllegalMove::NoPieceAtSource))
    }

    /// Work out whether the side to move is in check, checkmated or stalemated
    fn update_status(&mut self) {
        let side = self.state.side_to_move;
        self.in_check = RuleEngine.is_in_check(&self.state, side);
        let can_move = RuleEngine.has_legal_move(&self.state, side);
        self.status = match (self.in_check, can_move) {
            (_, true) => GameStatus::InProgress,
            (true, false) => GameStatus::Checkmate(side.other()),
            (false, false) => GameStatus::Stalemate,
        };
    }

    /// Take back the last move, returning `false` if there isn't one
    ///
    /// Nothing can be taken back while a promotion is pending; cancel it first.
    pub fn undo_last_move(&mut self) -> bool {
        if self.pending_promotion.is_some() {
            return false;
        }
        let Some(record) = self.history.pop() else {
            return false;
        };
        self.state.unmake_move(&record);
        if let Some((taken, _)) = record.captured {
            let restored = self.captured.pop();
            debug_assert_eq!(restored, Some(taken), "captured pieces out of order");
        }
        self.status = record.prior_status;
        self.in_check = record.was_in_check;
        self.selected = None;
        true
    }

    /// End the game as a draw, as agreed from outside the rules
    ///
    /// Returns `false` if the game was already over.
    pub fn declare_draw(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.status = GameStatus::Draw;
        self.pending_promotion = None;
        self.selected = None;
        true
    }

    /// The moves so far in standard algebraic notation, like `["e4", "d5", "exd5"]`
    pub fn algebraic_history(&self) -> Vec<String> {
        self.history
            .iter()
            .map(|record| record.san.to_string())
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
