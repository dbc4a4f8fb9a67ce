//! Core types: sides, RNG and dice, configuration, errors.
//!
//! This module contains the vocabulary shared by all five engines and the
//! session layer. Nothing here knows about any particular board.

pub mod side;
pub mod rng;
pub mod config;
pub mod error;

pub use side::{Side, SideMap};
pub use rng::{Dice, GameRng};
pub use config::{Difficulty, GameKind, PlayMode, SessionConfig, UnknownName};
pub use error::{GameError, GameResult};
