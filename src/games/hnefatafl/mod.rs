//! Hnefatafl (11×11 Copenhagen-style board).
//!
//! Side A has 24 attackers and moves first; side B has 12 defenders and a
//! king on the central throne. Pieces slide like rooks. Soldiers are taken by
//! custodian capture; the king escapes to a corner or is surrounded on all
//! four sides.

pub mod board;
mod ai;
mod game;

pub use game::{HnefataflCapture, HnefataflGame, HnefataflMove, HnefataflState};
