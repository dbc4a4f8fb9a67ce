//! What a session reports to its front end, and what it remembers.

use serde::{Deserialize, Serialize};

use crate::core::Side;
use crate::rules::Outcome;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The board reached a terminal position.
    Rules,
    /// A side resigned (or abandoned the room).
    Resignation,
}

/// Notifications drained with `GameSession::take_events`.
///
/// A rendering adapter only needs these plus `GameSession::state` to stay
/// in sync; it never reaches into an engine.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent<M, C> {
    DiceRolled { side: Side, value: u8 },
    /// The side had nothing to play after its throw.
    TurnPassed { side: Side },
    MoveApplied {
        side: Side,
        mv: M,
        captures: Vec<C>,
        extra_turn: bool,
        /// Arrived over the transport rather than from this device.
        remote: bool,
    },
    TurnChanged { side: Side },
    GameEnded { outcome: Outcome, reason: EndReason },
    /// A remote message did not fit the local board. The front end should
    /// request a snapshot from the peer.
    ResyncRequired { reason: String },
}

/// One entry of the session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntry<M> {
    Roll { side: Side, value: u8 },
    Pass { side: Side },
    Move { side: Side, mv: M },
    Resign { side: Side },
}

impl<M> LogEntry<M> {
    /// The side that acted.
    pub fn side(&self) -> Side {
        match self {
            LogEntry::Roll { side, .. }
            | LogEntry::Pass { side }
            | LogEntry::Move { side, .. }
            | LogEntry::Resign { side } => *side,
        }
    }

    /// Check if this entry is a board move.
    pub fn is_move(&self) -> bool {
        matches!(self, LogEntry::Move { .. })
    }
}
