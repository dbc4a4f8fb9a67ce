//! Ur move selection.
//!
//! - Easy: any legal move
//! - Medium: priority order (bear off, capture, rosette, furthest), taking
//!   the runner-up 30% of the time
//! - Hard: linear score, first best move wins ties

use std::cmp::Reverse;

use super::board::{is_rosette, is_shared};
use super::game::UrMove;
use crate::core::{Difficulty, GameRng};

/// Chance that medium plays its second choice.
const MEDIUM_SLIP: f64 = 0.3;

pub(super) fn select(moves: &[UrMove], difficulty: Difficulty, rng: &mut GameRng) -> Option<UrMove> {
    match difficulty {
        Difficulty::Easy => rng.choose(moves).copied(),
        Difficulty::Medium => {
            let ranked = rank(moves);
            if ranked.len() > 1 && rng.gen_bool(MEDIUM_SLIP) {
                Some(ranked[1])
            } else {
                ranked.first().copied()
            }
        }
        Difficulty::Hard => best_scoring(moves),
    }
}

/// Moves in medium priority order. The sort is stable.
fn rank(moves: &[UrMove]) -> Vec<UrMove> {
    let mut ranked = moves.to_vec();
    ranked.sort_by_key(|m| Reverse((m.bears_off, m.captures.is_some(), m.rosette, m.to)));
    ranked
}

fn best_scoring(moves: &[UrMove]) -> Option<UrMove> {
    let mut best: Option<(i32, UrMove)> = None;
    for &mv in moves {
        let s = score(&mv);
        if best.map_or(true, |(b, _)| s > b) {
            best = Some((s, mv));
        }
    }
    tracing::trace!(?best, "ur hard selection");
    best.map(|(_, mv)| mv)
}

/// Hard heuristic.
pub(super) fn score(mv: &UrMove) -> i32 {
    let mut score = 0;
    if mv.bears_off {
        score += 100;
    }
    if mv.captures.is_some() {
        score += 50;
    }
    if mv.rosette {
        score += 40;
    }
    score += i32::from(mv.to) * 2;
    // Leaving an exposed square
    if mv.from >= 0 && !is_rosette(mv.from) {
        score += 10;
    }
    if is_shared(mv.to) {
        score += 5;
    }
    score
}
