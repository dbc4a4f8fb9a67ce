//! # ancient-games
//!
//! Rules and AI engines for five two-player board games: the Royal Game of
//! Ur, Senet, Hnefatafl, Nine Men's Morris and Mancala.
//!
//! ## Design Principles
//!
//! 1. **Pure engines**: Every engine is a stateless `RulesEngine`. Applying a
//!    move returns a new state and never mutates the one it was given.
//!
//! 2. **Validated moves**: `apply_move` re-derives legality, so a move from a
//!    remote peer is checked exactly like a local one.
//!
//! 3. **Injectable randomness**: Dice and AI tie-breaks draw from seeded
//!    `GameRng` streams, so whole games replay deterministically.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG and dice, configuration, errors
//! - `rules`: The `RulesEngine` trait, `Outcome` and `Transition`
//! - `games`: One module per game (board topology, rules, AI)
//! - `session`: Turn orchestration, events, wire format
//! - `rating`: Elo update used by the identity service
//!
//! ```
//! use ancient_games::{MancalaGame, MancalaMove, RulesEngine, Side};
//!
//! let game = MancalaGame;
//! let state = game.initial_state();
//! let step = game.apply_move(&state, &MancalaMove { pit: 2 }).unwrap();
//! assert!(step.extra_turn);
//! assert_eq!(game.side_to_move(&step.state), Side::A);
//! ```

pub mod core;
pub mod rules;
pub mod games;
pub mod session;
pub mod rating;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    Dice, GameRng,
    Difficulty, GameKind, PlayMode, SessionConfig,
    GameError, GameResult,
};

pub use crate::rules::{Outcome, RulesEngine, Transition};

pub use crate::games::{
    HnefataflGame, HnefataflMove, HnefataflState,
    MancalaGame, MancalaMove, MancalaState,
    MorrisGame, MorrisMove, MorrisState,
    SenetGame, SenetMove, SenetState,
    UrGame, UrMove, UrState,
};

pub use crate::session::{
    EndReason, GameSession, LogEntry, OutcomeNotice, SessionEvent, Snapshot, WireMessage,
};

pub use crate::rating::{elo_update, RatingConfig};
