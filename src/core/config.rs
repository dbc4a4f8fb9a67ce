//! Configuration types.
//!
//! - `GameKind`: Which of the five games a value belongs to
//! - `Difficulty`: AI strength knob, read only by AI move selectors
//! - `PlayMode`: Who drives the non-local side (AI, same screen, remote peer)
//! - `SessionConfig`: Everything a `GameSession` needs at startup

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::side::Side;

/// The five supported games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Ur,
    Senet,
    Hnefatafl,
    Morris,
    Mancala,
}

impl GameKind {
    /// All games, in menu order.
    pub const ALL: [GameKind; 5] = [
        GameKind::Ur,
        GameKind::Senet,
        GameKind::Hnefatafl,
        GameKind::Morris,
        GameKind::Mancala,
    ];

    /// Lowercase identifier used in room names and rating keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameKind::Ur => "ur",
            GameKind::Senet => "senet",
            GameKind::Hnefatafl => "hnefatafl",
            GameKind::Morris => "morris",
            GameKind::Mancala => "mancala",
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// AI difficulty.
///
/// No difficulty searches beyond one ply; "hard" only means a richer
/// single-move heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

impl FromStr for Difficulty {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// Error for an unrecognised game or difficulty name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0:?}")]
pub struct UnknownName(pub String);

/// Who plays the side that is not `local_side`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayMode {
    /// The core's own AI selector.
    #[default]
    Ai,
    /// Both sides play on the same device.
    Local,
    /// A remote peer, through the realtime transport.
    Online,
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Who drives the opposing side.
    pub mode: PlayMode,

    /// The side controlled on this device.
    pub local_side: Side,

    /// AI strength when `mode` is `Ai`.
    pub difficulty: Difficulty,

    /// Seed for the dice and AI random streams.
    /// Same seed produces deterministic sessions.
    pub seed: u64,

    /// Pause, in milliseconds, the host's scheduler waits before calling
    /// `GameSession::play_ai_turn`. Carried for the host only: nothing in
    /// this crate reads it or sleeps.
    pub ai_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: PlayMode::Ai,
            local_side: Side::A,
            difficulty: Difficulty::Medium,
            seed: 42,
            ai_delay_ms: 500,
        }
    }
}

impl SessionConfig {
    /// Create a new config with a custom play mode.
    pub fn with_mode(mut self, mode: PlayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Create a new config with a custom local side.
    pub fn with_local_side(mut self, side: Side) -> Self {
        self.local_side = side;
        self
    }

    /// Create a new config with a custom difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Create a new config with a custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom AI delay.
    pub fn with_ai_delay_ms(mut self, delay: u64) -> Self {
        self.ai_delay_ms = delay;
        self
    }

    /// The side driven by the AI, if any.
    #[must_use]
    pub fn ai_side(&self) -> Option<Side> {
        match self.mode {
            PlayMode::Ai => Some(self.local_side.other()),
            PlayMode::Local | PlayMode::Online => None,
        }
    }

    /// The side whose moves arrive over the transport, if any.
    #[must_use]
    pub fn remote_side(&self) -> Option<Side> {
        match self.mode {
            PlayMode::Online => Some(self.local_side.other()),
            PlayMode::Ai | PlayMode::Local => None,
        }
    }
}
