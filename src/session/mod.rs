//! Game sessions and the peer-to-peer wire format.
//!
//! - `GameSession`: owns one board, sequences local, AI and remote actions
//! - `events`: notifications for a rendering adapter, plus the move log
//! - `wire`: bincode messages for the realtime transport

pub mod events;
pub mod wire;
mod game_session;

pub use events::{EndReason, LogEntry, SessionEvent};
pub use game_session::{EventOf, GameSession, WireOf};
pub use wire::{OutcomeNotice, Snapshot, WireMessage};
