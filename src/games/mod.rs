//! The five game engines.
//!
//! Every game is a stateless `RulesEngine` implementation over its own
//! serialisable board state.

pub mod hnefatafl;
pub mod mancala;
pub mod morris;
pub mod senet;
pub mod ur;

pub use hnefatafl::{HnefataflGame, HnefataflMove, HnefataflState};
pub use mancala::{MancalaGame, MancalaMove, MancalaState};
pub use morris::{MorrisGame, MorrisMove, MorrisState};
pub use senet::{SenetGame, SenetMove, SenetState};
pub use ur::{UrGame, UrMove, UrState};
