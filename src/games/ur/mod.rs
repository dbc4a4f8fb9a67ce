//! The Royal Game of Ur.
//!
//! - Seven pieces per side race along a 14-square path
//! - Four binary dice per turn (0–4); a zero throw forfeits the turn
//! - Landing on an opponent in the shared lane sends it back to start
//! - Rosettes are safe and grant another throw
//! - Bearing off needs an exact throw; first side home with all seven wins

pub mod board;
mod ai;
mod game;

pub use game::{UrCapture, UrGame, UrMove, UrState};
