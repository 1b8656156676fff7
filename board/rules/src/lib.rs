//! The rules of chess, and a game played by them
//!
//! [`GameState`] is the entry point: it owns the board and everything else about a game in
//! progress, and is the only thing that changes it. The rest of this crate answers questions
//! about a [`BoardState`] without changing it.
//!
//! ```
//! use board::Square;
//! use rules::{GameState, GameStatus};
//!
//! let mut game = GameState::new();
//! assert!(game.attempt_move(Square::E2, Square::E4));
//! assert!(!game.attempt_move(Square::E4, Square::E5), "it's black's turn");
//! assert_eq!(game.status(), GameStatus::InProgress);
//! assert!(game.undo_last_move());
//! ```

use core::fmt;

use board::{Color, NotationError, PieceKind};

pub mod attacks;
pub mod castling;
mod engine;
mod fen;
mod game;
mod history;
mod mailbox;
pub mod movement;
mod notation;
mod square_set;
mod state;

pub use crate::castling::{CastleRights, Wing};
pub use crate::engine::{MoveClass, RuleEngine};
pub use crate::game::{GameState, PendingPromotion};
pub use crate::history::{MoveHistory, MoveRecord};
pub use crate::mailbox::Board;
pub use crate::square_set::SquareSet;
pub use crate::state::{BoardState, MoveEffects};

pub type Result<T, E = MoveError> = core::result::Result<T, E>;

/// Why a move can't be made
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum IllegalMove {
    #[error("square is off the board")]
    OffBoard,
    #[error("no piece found at move source")]
    NoPieceAtSource,
    #[error("piece at move source belongs to the side not moving")]
    WrongSide,
    #[error("move source and target are the same square")]
    SameSquare,
    #[error("attempted to capture a piece of the moving side")]
    OwnPieceCapture,
    #[error("piece can't move that way")]
    GeometricMismatch,
    #[error("attempted move leaves moving side's king in check")]
    LeavesKingInCheck,
    #[error("the game is already over")]
    GameOver,
    #[error("a promotion must be finished or cancelled first")]
    PromotionPending,
}

/// Errors from trying to play a move
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MoveError {
    #[error("illegal move: {0}")]
    Illegal(#[from] IllegalMove),
    #[error("can't promote into a {0:?}")]
    InvalidPromotion(PieceKind),
    #[error("pawn reaching the last rank needs a promotion")]
    MissingPromotion,
    #[error("error reading move: {0}")]
    Notation(#[from] NotationError),
}

/// Errors from reading a position in Forsyth-Edwards notation
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("bad piece placement: {0}")]
    Placement(String),
    #[error("side to move should be `w` or `b`, not {0:?}")]
    SideToMove(String),
    #[error("bad castling availability {0:?}")]
    Castling(String),
    #[error("bad en passant square {0:?}")]
    EnPassant(String),
    #[error("bad move counter {0:?}")]
    Counter(String),
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// Why a position can't be played on from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum PositionError {
    #[error("{0} should have exactly one king")]
    KingCount(Color),
    #[error("{0} king isn't on the square recorded for it")]
    KingMisplaced(Color),
    #[error("{0} is in check with the other side to move")]
    OpponentInCheck(Color),
}

/// Where a game stands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameStatus {
    #[default]
    InProgress,
    /// The given side won by checkmate
    Checkmate(Color),
    Stalemate,
    /// Agreed from outside the game, never found by the rules themselves
    Draw,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => f.write_str("in progress"),
            Self::Checkmate(winner) => write!(f, "checkmate, {winner} wins"),
            Self::Stalemate => f.write_str("stalemate"),
            Self::Draw => f.write_str("draw"),
        }
    }
}
