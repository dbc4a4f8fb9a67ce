//! Royal Game of Ur rules.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ai;
use super::board::{cell, is_rosette, PIECES, SCORED, START};
use crate::core::{Dice, Difficulty, GameError, GameKind, GameResult, GameRng, Side, SideMap};
use crate::rules::{Outcome, RulesEngine, Transition};

/// Ur board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrState {
    /// Path position of every piece: `START`, `0..=13`, or `SCORED`.
    pub pieces: SideMap<[i8; PIECES]>,
    /// Side whose turn it is.
    pub to_move: Side,
    /// This turn's throw, once made.
    pub roll: Option<u8>,
}

impl UrState {
    /// Pieces of `side` that have borne off.
    #[must_use]
    pub fn scored(&self, side: Side) -> usize {
        self.pieces[side].iter().filter(|&&p| p == SCORED).count()
    }

    /// Pieces of `side` waiting to enter.
    #[must_use]
    pub fn waiting(&self, side: Side) -> usize {
        self.pieces[side].iter().filter(|&&p| p == START).count()
    }

    /// Pieces of `side` somewhere on the path.
    #[must_use]
    pub fn on_path(&self, side: Side) -> usize {
        self.pieces[side].iter().filter(|&&p| (0..SCORED).contains(&p)).count()
    }

    /// Index of the opposing piece standing on the cell `side` would reach at `pos`.
    fn opponent_at(&self, side: Side, pos: i8) -> Option<u8> {
        let target = cell(side, pos)?;
        let opponent = side.other();
        self.pieces[opponent]
            .iter()
            .position(|&p| cell(opponent, p) == Some(target))
            .map(|i| i as u8)
    }
}

/// A single Ur move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrMove {
    /// Index of the moving piece within its side's array.
    pub piece: u8,
    pub from: i8,
    pub to: i8,
    /// Opposing piece sent back to start.
    pub captures: Option<u8>,
    pub bears_off: bool,
    /// Destination is a rosette (extra turn).
    pub rosette: bool,
}

/// An opposing piece knocked back to start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrCapture {
    pub piece: u8,
    /// Where it stood when hit.
    pub at: i8,
}

/// The Royal Game of Ur.
#[derive(Clone, Copy, Debug, Default)]
pub struct UrGame;

impl UrGame {
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for UrGame {
    type State = UrState;
    type Move = UrMove;
    type Capture = UrCapture;

    fn kind(&self) -> GameKind {
        GameKind::Ur
    }

    fn initial_state(&self) -> UrState {
        UrState {
            pieces: SideMap::with_value([START; PIECES]),
            to_move: Side::A,
            roll: None,
        }
    }

    fn side_to_move(&self, state: &UrState) -> Side {
        state.to_move
    }

    fn legal_moves(&self, state: &UrState, side: Side) -> Vec<UrMove> {
        let roll = match state.roll {
            Some(r) if r > 0 && side == state.to_move => r as i8,
            _ => return vec![],
        };

        let own = &state.pieces[side];
        let mut moves = Vec::new();
        let mut start_listed = false;

        for (i, &from) in own.iter().enumerate() {
            if from == SCORED {
                continue;
            }
            // Waiting pieces are interchangeable; list one of them.
            if from == START {
                if start_listed {
                    continue;
                }
                start_listed = true;
            }

            let to = from + roll;
            if to > SCORED {
                continue;
            }
            if to == SCORED {
                moves.push(UrMove {
                    piece: i as u8,
                    from,
                    to,
                    captures: None,
                    bears_off: true,
                    rosette: false,
                });
                continue;
            }
            if own.contains(&to) {
                continue;
            }

            let rosette = is_rosette(to);
            let captures = state.opponent_at(side, to);
            // Rosettes are safe
            if captures.is_some() && rosette {
                continue;
            }

            moves.push(UrMove {
                piece: i as u8,
                from,
                to,
                captures,
                bears_off: false,
                rosette,
            });
        }

        moves
    }

    fn apply_move(&self, state: &UrState, mv: &UrMove) -> GameResult<Transition<UrState, UrCapture>> {
        self.ensure_legal(state, mv)?;

        let side = state.to_move;
        let mut next = state.clone();
        let mut captures = SmallVec::new();

        if let Some(piece) = mv.captures {
            let slot = &mut next.pieces[side.other()][piece as usize];
            captures.push(UrCapture { piece, at: *slot });
            *slot = START;
        }
        next.pieces[side][mv.piece as usize] = mv.to;
        next.roll = None;

        let extra_turn = mv.rosette;
        if !extra_turn && !self.outcome(&next).is_terminal() {
            next.to_move = side.other();
        }

        Ok(Transition {
            state: next,
            captures,
            extra_turn,
        })
    }

    fn outcome(&self, state: &UrState) -> Outcome {
        Side::BOTH
            .into_iter()
            .find(|&side| state.scored(side) == PIECES)
            .map_or(Outcome::Ongoing, Outcome::Winner)
    }

    fn validate_state(&self, state: &UrState) -> GameResult<()> {
        let invalid = |reason: String| Err(GameError::invalid_state(GameKind::Ur, reason));
        if let Some(roll) = state.roll.filter(|&r| !Dice::UR.can_show(r)) {
            return invalid(format!("throw of {roll}"));
        }
        let mut occupied = FxHashSet::default();
        for side in Side::BOTH {
            for &pos in &state.pieces[side] {
                if !(START..=SCORED).contains(&pos) {
                    return invalid(format!("{side} piece at path index {pos}"));
                }
                if let Some(c) = cell(side, pos) {
                    if !occupied.insert(c) {
                        return invalid(format!("two pieces on cell {c}"));
                    }
                }
            }
        }
        Ok(())
    }

    fn select_ai_move(
        &self,
        state: &UrState,
        side: Side,
        difficulty: Difficulty,
        rng: &mut GameRng,
    ) -> GameResult<UrMove> {
        let moves = self.legal_moves(state, side);
        ai::select(&moves, difficulty, rng).ok_or(GameError::NoLegalMove {
            game: GameKind::Ur,
            side,
        })
    }

    fn dice(&self) -> Option<Dice> {
        Some(Dice::UR)
    }

    fn awaiting_roll(&self, state: &UrState) -> bool {
        state.roll.is_none() && !self.outcome(state).is_terminal()
    }

    fn with_roll(&self, state: &UrState, value: u8) -> GameResult<UrState> {
        if !self.awaiting_roll(state) {
            return Err(GameError::RollNotExpected);
        }
        if !Dice::UR.can_show(value) {
            return Err(GameError::InvalidRoll { value });
        }
        Ok(UrState {
            roll: Some(value),
            ..state.clone()
        })
    }

    fn pass_turn(&self, state: &UrState) -> GameResult<UrState> {
        if !self.must_pass(state) {
            return Err(GameError::CannotPass { side: state.to_move });
        }
        Ok(UrState {
            roll: None,
            to_move: state.to_move.other(),
            ..state.clone()
        })
    }
}
