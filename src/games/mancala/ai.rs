//! Mancala move selection.
//!
//! Each pit is sown on a scratch board and scored by what the sowing alone
//! achieves. Captures are estimated, not resolved.

use super::game::{opposite, pits_of, sow, store, MancalaMove, MancalaState};
use crate::core::{Difficulty, GameRng, Side};

const JITTER: f64 = 2.0;

/// Chance that easy plays any pit.
const EASY_RANDOM: f64 = 0.4;

pub(super) fn select(
    state: &MancalaState,
    side: Side,
    moves: &[MancalaMove],
    difficulty: Difficulty,
    rng: &mut GameRng,
) -> Option<MancalaMove> {
    let mut best: Option<(f64, MancalaMove)> = None;
    for &mv in moves {
        let s = score(state, side, mv) + rng.gen_unit() * JITTER;
        if best.map_or(true, |(b, _)| s > b) {
            best = Some((s, mv));
        }
    }
    tracing::trace!(?best, "mancala selection");

    if difficulty == Difficulty::Easy && rng.gen_bool(EASY_RANDOM) {
        return rng.choose(moves).copied();
    }
    best.map(|(_, mv)| mv)
}

pub(super) fn score(state: &MancalaState, side: Side, mv: MancalaMove) -> f64 {
    let own_store = store(side);
    let sown = sow(&state.pits, mv.pit as usize, side);
    let mut score = 0.0;

    if sown.last == own_store {
        score += 20.0;
    }
    if pits_of(side).contains(&sown.last) && sown.pits[sown.last] == 1 {
        score += f64::from(sown.pits[opposite(sown.last)]) * 3.0;
    }
    score += f64::from(sown.pits[own_store] - state.pits[own_store]) * 2.0;
    score
}
