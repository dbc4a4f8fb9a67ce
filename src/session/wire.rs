//! Wire format for the realtime transport.
//!
//! Every message travels as a bincode-encoded `(GameKind, WireMessage)` pair.
//! The game tag lets a session reject traffic meant for another board before
//! it tries to decode a foreign move type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::events::EndReason;
use crate::core::{GameError, GameKind, GameResult, Side};
use crate::rules::Outcome;

/// A message exchanged between two sessions of the same game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WireMessage<M, S> {
    /// A throw made by `side` (Ur, Senet).
    Roll { side: Side, value: u8 },
    /// A move made by `side`.
    Move { side: Side, mv: M },
    /// Full position for a joining or reconnecting peer.
    Snapshot(Snapshot<S>),
    Resign { side: Side },
    /// The sender saw the game end.
    Ended(OutcomeNotice),
}

/// Everything needed to resume a game mid-way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<S> {
    pub game: GameKind,
    pub state: S,
    /// Set once a side has resigned.
    pub resigned: Option<Side>,
    /// Moves played before this snapshot.
    pub moves: u32,
}

/// Final result handed to the identity/economy collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeNotice {
    pub game: GameKind,
    pub outcome: Outcome,
    pub reason: EndReason,
    /// Board moves played, rolls and passes excluded.
    pub moves: u32,
}

impl OutcomeNotice {
    /// Match score for `side`: 1 for a win, 0.5 for a draw, 0 for a loss.
    #[must_use]
    pub fn score_for(&self, side: Side) -> f64 {
        match self.outcome {
            Outcome::Winner(winner) if winner == side => 1.0,
            Outcome::Winner(_) => 0.0,
            Outcome::Draw | Outcome::Ongoing => 0.5,
        }
    }
}

/// Encode a message for `game`.
pub fn encode<M, S>(game: GameKind, message: &WireMessage<M, S>) -> GameResult<Vec<u8>>
where
    M: Serialize,
    S: Serialize,
{
    Ok(bincode::serialize(&(game, message))?)
}

/// Decode a message, rejecting one tagged for another game.
pub fn decode<M, S>(expected: GameKind, bytes: &[u8]) -> GameResult<WireMessage<M, S>>
where
    M: DeserializeOwned,
    S: DeserializeOwned,
{
    let got: GameKind = bincode::deserialize(bytes)?;
    if got != expected {
        return Err(GameError::WrongGame { expected, got });
    }
    let (_, message): (GameKind, WireMessage<M, S>) = bincode::deserialize(bytes)?;
    Ok(message)
}
