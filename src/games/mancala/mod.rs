//! Mancala (Kalah rules, four seeds per pit).
//!
//! Sowing skips the opponent's store. A last seed in the own store earns
//! another turn; a last seed in an empty own pit captures across the board.
//! When one row runs dry the other side sweeps its seeds home.

mod ai;
mod game;

pub use game::{
    opposite, pits_of, store, MancalaCapture, MancalaGame, MancalaMove, MancalaState, PITS, SEEDS_PER_PIT,
};
