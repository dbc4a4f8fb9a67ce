//! Mancala (Kalah) rules.
//!
//! Pits are numbered counter-clockwise from side A's leftmost pit:
//!
//! ```text
//!       12 11 10  9  8  7
//!   13                     6
//!        0  1  2  3  4  5
//! ```

use std::ops::Range;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ai;
use crate::core::{Difficulty, GameError, GameKind, GameResult, GameRng, Side};
use crate::rules::{Outcome, RulesEngine, Transition};

/// Pits plus stores.
pub const PITS: usize = 14;

/// Seeds in each playing pit at the start.
pub const SEEDS_PER_PIT: u8 = 4;

/// Index of a side's store.
#[must_use]
pub const fn store(side: Side) -> usize {
    match side {
        Side::A => 6,
        Side::B => 13,
    }
}

/// Indices of a side's six playing pits.
#[must_use]
pub const fn pits_of(side: Side) -> Range<usize> {
    match side {
        Side::A => 0..6,
        Side::B => 7..13,
    }
}

/// The pit across the board.
#[must_use]
pub const fn opposite(pit: usize) -> usize {
    12 - pit
}

/// Mancala board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MancalaState {
    pub pits: [u8; PITS],
    pub to_move: Side,
}

impl MancalaState {
    /// Seeds left in a side's playing pits.
    #[must_use]
    pub fn seeds_in_play(&self, side: Side) -> u32 {
        self.pits[pits_of(side)].iter().map(|&s| u32::from(s)).sum()
    }

    /// Seeds on the whole board.
    #[must_use]
    pub fn total_seeds(&self) -> u32 {
        self.pits.iter().map(|&s| u32::from(s)).sum()
    }

    /// Check if either side has run out of seeds.
    #[must_use]
    pub fn one_side_empty(&self) -> bool {
        Side::BOTH.iter().any(|&side| self.seeds_in_play(side) == 0)
    }

    /// Store totals once the remaining seeds are swept home.
    #[must_use]
    pub fn final_stores(&self) -> (u32, u32) {
        let total = |side| u32::from(self.pits[store(side)]) + self.seeds_in_play(side);
        (total(Side::A), total(Side::B))
    }
}

/// Sow from one of the mover's pits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MancalaMove {
    pub pit: u8,
}

/// Seeds taken from the pit opposite the last sown seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MancalaCapture {
    pub pit: u8,
    pub seeds: u8,
}

/// Where sowing ended.
pub(super) struct Sown {
    pub pits: [u8; PITS],
    pub last: usize,
}

/// Pick up every seed in `pit` and drop one in each following pit,
/// skipping the opponent's store.
pub(super) fn sow(pits: &[u8; PITS], pit: usize, side: Side) -> Sown {
    let mut pits = *pits;
    let skip = store(side.other());
    let mut seeds = pits[pit];
    pits[pit] = 0;

    let mut current = pit;
    while seeds > 0 {
        current = (current + 1) % PITS;
        if current == skip {
            continue;
        }
        pits[current] += 1;
        seeds -= 1;
    }
    Sown { pits, last: current }
}

/// Mancala with four seeds per pit. Side A sows first.
#[derive(Clone, Copy, Debug, Default)]
pub struct MancalaGame;

impl MancalaGame {
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for MancalaGame {
    type State = MancalaState;
    type Move = MancalaMove;
    type Capture = MancalaCapture;

    fn kind(&self) -> GameKind {
        GameKind::Mancala
    }

    fn initial_state(&self) -> MancalaState {
        let mut pits = [SEEDS_PER_PIT; PITS];
        pits[store(Side::A)] = 0;
        pits[store(Side::B)] = 0;
        MancalaState {
            pits,
            to_move: Side::A,
        }
    }

    fn side_to_move(&self, state: &MancalaState) -> Side {
        state.to_move
    }

    fn legal_moves(&self, state: &MancalaState, side: Side) -> Vec<MancalaMove> {
        if side != state.to_move {
            return vec![];
        }
        pits_of(side)
            .filter(|&pit| state.pits[pit] > 0)
            .map(|pit| MancalaMove { pit: pit as u8 })
            .collect()
    }

    fn apply_move(
        &self,
        state: &MancalaState,
        mv: &MancalaMove,
    ) -> GameResult<Transition<MancalaState, MancalaCapture>> {
        self.ensure_legal(state, mv)?;

        let side = state.to_move;
        let own_store = store(side);
        let Sown { mut pits, last } = sow(&state.pits, mv.pit as usize, side);

        let extra_turn = last == own_store;
        let mut captures = SmallVec::new();

        // Last seed in an empty own pit takes the pit across, if it holds any
        if !extra_turn && pits_of(side).contains(&last) && pits[last] == 1 {
            let across = opposite(last);
            if pits[across] > 0 {
                captures.push(MancalaCapture {
                    pit: across as u8,
                    seeds: pits[across],
                });
                pits[own_store] += pits[across] + pits[last];
                pits[across] = 0;
                pits[last] = 0;
            }
        }

        let mut next = MancalaState {
            pits,
            to_move: side,
        };

        let finished = next.one_side_empty();
        if finished {
            for sweeper in Side::BOTH {
                let remaining: u8 = pits_of(sweeper).map(|pit| std::mem::take(&mut next.pits[pit])).sum();
                next.pits[store(sweeper)] += remaining;
            }
        } else if !extra_turn {
            next.to_move = side.other();
        }

        Ok(Transition {
            state: next,
            captures,
            // Nobody moves again on a finished board
            extra_turn: extra_turn && !finished,
        })
    }

    fn outcome(&self, state: &MancalaState) -> Outcome {
        if !state.one_side_empty() {
            return Outcome::Ongoing;
        }
        let (a, b) = state.final_stores();
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::A),
            std::cmp::Ordering::Less => Outcome::Winner(Side::B),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    fn validate_state(&self, state: &MancalaState) -> GameResult<()> {
        let expected = u32::from(SEEDS_PER_PIT) * 12;
        let total = state.total_seeds();
        if total != expected {
            return Err(GameError::invalid_state(
                GameKind::Mancala,
                format!("{total} seeds on the board"),
            ));
        }
        Ok(())
    }

    fn select_ai_move(
        &self,
        state: &MancalaState,
        side: Side,
        difficulty: Difficulty,
        rng: &mut GameRng,
    ) -> GameResult<MancalaMove> {
        let moves = self.legal_moves(state, side);
        ai::select(state, side, &moves, difficulty, rng).ok_or(GameError::NoLegalMove {
            game: GameKind::Mancala,
            side,
        })
    }
}
