//! Senet move selection: bear off, then swap, then advance the furthest.

use std::cmp::Reverse;

use super::game::SenetMove;

pub(super) fn select(moves: &[SenetMove]) -> Option<SenetMove> {
    let mut ranked = moves.to_vec();
    ranked.sort_by_key(|m| Reverse((m.bears_off, m.swap, m.to)));
    ranked.first().copied()
}
