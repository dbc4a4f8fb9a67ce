//! Senet.
//!
//! - Five pieces per side start interleaved on the first ten squares
//! - Four throwing sticks per turn (1–5, no marks counts as 5)
//! - Landing on a lone opposing piece swaps the two
//! - Throws of 1, 4 and 5 grant another turn
//! - The last houses gate the exit; first side to bear off all five wins

pub mod board;
mod ai;
mod game;

pub use game::{SenetGame, SenetMove, SenetState, SenetSwap};
