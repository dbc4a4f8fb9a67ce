//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal moves for each game state
//! - How moves modify state
//! - Win/loss/draw conditions
//! - A shallow heuristic AI
//!
//! The session layer calls into `RulesEngine` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{Outcome, RulesEngine, Transition};
