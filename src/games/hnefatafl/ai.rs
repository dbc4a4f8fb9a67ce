//! Hnefatafl move selection: score every move, then pick uniformly among the top three.

use std::cmp::Reverse;

use super::board::{Piece, DIRECTIONS};
use super::game::{HnefataflMove, HnefataflState};
use crate::core::GameRng;

/// How many of the best-scoring moves are candidates.
const SHORTLIST: usize = 3;

const ESCAPE: i32 = 1000;

pub(super) fn select(state: &HnefataflState, moves: &[HnefataflMove], rng: &mut GameRng) -> Option<HnefataflMove> {
    let mut scored: Vec<(i32, HnefataflMove)> = moves.iter().map(|&mv| (score(state, &mv), mv)).collect();
    scored.sort_by_key(|&(s, _)| Reverse(s));
    scored.truncate(SHORTLIST);
    tracing::trace!(?scored, "hnefatafl shortlist");
    rng.choose(&scored).map(|&(_, mv)| mv)
}

/// Heuristic value of a move, read off the board before it is played.
pub(super) fn score(state: &HnefataflState, mv: &HnefataflMove) -> i32 {
    let Some(piece) = state.at(mv.from) else {
        return 0;
    };
    let mut score = 0;

    if piece == Piece::King {
        if mv.to.is_corner() {
            return ESCAPE;
        }
        score += (20 - i32::from(mv.to.corner_distance())) * 5;
    }

    // Enemies next to the landing square are capture chances
    let prey = if piece == Piece::Attacker { Piece::Defender } else { Piece::Attacker };
    for dir in DIRECTIONS {
        if mv.to.offset(dir, 1).is_some_and(|sq| state.at(sq) == Some(prey)) {
            score += 20;
        }
    }

    if piece == Piece::Attacker {
        if let Some(king) = state.king() {
            score += (20 - i32::from(mv.to.distance(king))) * 2;
        }
    }
    score
}
