//! Error types shared by every engine and the session layer.
//!
//! All of these are recoverable: a failed call leaves the board it was given
//! untouched, and the caller decides whether to retry, resync or disconnect.

use super::config::{GameKind, PlayMode};
use super::side::Side;
use crate::rules::Outcome;

/// Errors raised by engines and sessions.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The submitted move is not in the legal move list for the current state.
    #[error("illegal {game} move: {reason}")]
    IllegalMove { game: GameKind, reason: String },

    /// A position that breaks the game's own invariants.
    #[error("invalid {game} position: {reason}")]
    InvalidState { game: GameKind, reason: String },

    /// An AI move was requested for a side with nothing to play.
    #[error("{side} has no legal {game} move")]
    NoLegalMove { game: GameKind, side: Side },

    /// The game already ended.
    #[error("game is over: {outcome}")]
    GameOver { outcome: Outcome },

    /// A move or roll arrived from the side that is not to move.
    #[error("not {got}'s turn, {expected} is to move")]
    NotYourTurn { expected: Side, got: Side },

    /// An AI turn was requested in a mode with no AI player.
    #[error("no side is played by the AI in {mode:?} mode")]
    NoAiSide { mode: PlayMode },

    /// The side to move must throw before moving.
    #[error("a roll is required before moving")]
    RollRequired,

    /// A roll was supplied when none is pending (or the game has no dice).
    #[error("no roll is expected now")]
    RollNotExpected,

    /// A roll value the game's dice cannot show.
    #[error("invalid roll value {value}")]
    InvalidRoll { value: u8 },

    /// A turn pass was requested while a legal move exists.
    #[error("cannot pass: {side} has a legal move")]
    CannotPass { side: Side },

    /// A remote message does not fit the local state; resync required.
    #[error("remote state diverged: {reason}")]
    Desync { reason: String },

    /// A wire message was meant for a different game.
    #[error("message for {got} delivered to a {expected} session")]
    WrongGame { expected: GameKind, got: GameKind },

    /// Wire encoding or decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

impl GameError {
    /// Shorthand for an `IllegalMove`.
    pub fn illegal(game: GameKind, reason: impl Into<String>) -> Self {
        GameError::IllegalMove {
            game,
            reason: reason.into(),
        }
    }

    /// Shorthand for an `InvalidState`.
    pub fn invalid_state(game: GameKind, reason: impl Into<String>) -> Self {
        GameError::InvalidState {
            game,
            reason: reason.into(),
        }
    }
}

/// Result type alias for engine and session operations.
pub type GameResult<T> = Result<T, GameError>;
