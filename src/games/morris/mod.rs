//! Nine Men's Morris.
//!
//! Each side places nine pieces on a 24-point board, then slides them along
//! the lines. Closing a mill takes an opposing piece. A side reduced to three
//! pieces may fly to any empty point; below three, or with no move, it loses.

pub mod board;
mod ai;
mod game;

pub use game::{MorrisCapture, MorrisGame, MorrisMove, MorrisPhase, MorrisState};
