//! Morris move selection: one-ply heuristic with a little jitter.

use super::board::{mills_through, CROSS_POINTS, POINTS};
use super::game::{MorrisMove, MorrisState};
use crate::core::{Difficulty, GameRng, Side};

/// Upper bound of the random term added to every score.
const JITTER: f64 = 5.0;

/// Chance that easy ignores the scores.
const EASY_RANDOM: f64 = 0.4;

pub(super) fn select(
    state: &MorrisState,
    side: Side,
    moves: &[MorrisMove],
    difficulty: Difficulty,
    rng: &mut GameRng,
) -> Option<MorrisMove> {
    let mut best: Option<(f64, MorrisMove)> = None;
    for &mv in moves {
        let s = score(state, side, mv) + rng.gen_unit() * JITTER;
        if best.map_or(true, |(b, _)| s > b) {
            best = Some((s, mv));
        }
    }
    tracing::trace!(?best, "morris selection");

    if difficulty == Difficulty::Easy && rng.gen_bool(EASY_RANDOM) {
        return rng.choose(moves).copied();
    }
    best.map(|(_, mv)| mv)
}

fn count(board: &[Option<Side>; POINTS], line: &[u8; 3], who: Side) -> usize {
    line.iter().filter(|&&p| board[p as usize] == Some(who)).count()
}

/// Deterministic part of the heuristic.
pub(super) fn score(state: &MorrisState, side: Side, mv: MorrisMove) -> f64 {
    let opponent = side.other();

    if let MorrisMove::Remove { pos } = mv {
        // Break up lines the opponent is building
        let threats = mills_through(pos)
            .filter(|line| count(&state.board, line, opponent) == 2)
            .count();
        return 50.0 + 30.0 * threats as f64;
    }

    let Some(target) = mv.target() else {
        return 0.0;
    };
    let mut after = state.board;
    if let MorrisMove::Move { from, .. } = mv {
        after[from as usize] = None;
    }
    after[target as usize] = Some(side);

    let mut score = 0.0;
    if mills_through(target).any(|line| count(&after, line, side) == 3) {
        score += 100.0;
    }
    for line in mills_through(target) {
        if count(&after, line, side) == 2 {
            score += 30.0;
        }
        if count(&state.board, line, opponent) == 2 && state.board[target as usize].is_none() {
            score += 40.0;
        }
    }
    if CROSS_POINTS.contains(&target) {
        score += 10.0;
    }
    score
}
