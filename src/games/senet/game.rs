//! Senet rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ai;
use super::board::{is_safe, required_throw, BEAUTY, EXIT, PIECES, REBIRTH, SQUARES, WATER};
use crate::core::{Dice, Difficulty, GameError, GameKind, GameResult, GameRng, Side, SideMap};
use crate::rules::{Outcome, RulesEngine, Transition};

/// Senet board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenetState {
    /// Occupant of every square.
    pub squares: [Option<Side>; SQUARES],
    /// Pieces each side has already taken off the board.
    pub borne_off: SideMap<u8>,
    /// Side whose turn it is.
    pub to_move: Side,
    /// This turn's throw, once made.
    pub roll: Option<u8>,
}

impl SenetState {
    /// Pieces of `side` still on the board.
    #[must_use]
    pub fn on_board(&self, side: Side) -> usize {
        self.squares.iter().filter(|&&s| s == Some(side)).count()
    }

    /// Squares holding pieces of `side`, in path order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = u8> + '_ {
        (0..SQUARES as u8).filter(move |&sq| self.squares[sq as usize] == Some(side))
    }

    fn occupant(&self, square: u8) -> Option<Side> {
        self.squares.get(square as usize).copied().flatten()
    }

    /// A piece with a neighbour of its own colour cannot be displaced.
    fn is_protected(&self, owner: Side, square: u8) -> bool {
        let before = square.checked_sub(1).and_then(|sq| self.occupant(sq));
        let after = self.occupant(square + 1);
        before == Some(owner) || after == Some(owner)
    }

    /// Where a drowned piece comes back: rebirth, or the nearest free square before it.
    fn rebirth_square(&self) -> Option<u8> {
        (0..=REBIRTH).rev().find(|&sq| self.occupant(sq).is_none())
    }
}

/// A single Senet move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenetMove {
    pub from: u8,
    /// Final square; `EXIT` when bearing off, the rebirth square after water.
    pub to: u8,
    /// Trades places with the opposing piece on `to`.
    pub swap: bool,
    /// Landed in the House of Water and was sent back.
    pub water: bool,
    pub bears_off: bool,
}

/// An opposing piece displaced by a swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenetSwap {
    /// Square the opposing piece was standing on.
    pub from: u8,
    /// Square it was pushed back to.
    pub to: u8,
}

/// Senet.
#[derive(Clone, Copy, Debug, Default)]
pub struct SenetGame;

impl SenetGame {
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for SenetGame {
    type State = SenetState;
    type Move = SenetMove;
    type Capture = SenetSwap;

    fn kind(&self) -> GameKind {
        GameKind::Senet
    }

    fn initial_state(&self) -> SenetState {
        let mut squares = [None; SQUARES];
        for (i, square) in squares.iter_mut().take(PIECES * 2).enumerate() {
            *square = Some(if i % 2 == 0 { Side::A } else { Side::B });
        }
        SenetState {
            squares,
            borne_off: SideMap::with_value(0),
            to_move: Side::A,
            roll: None,
        }
    }

    fn side_to_move(&self, state: &SenetState) -> Side {
        state.to_move
    }

    fn legal_moves(&self, state: &SenetState, side: Side) -> Vec<SenetMove> {
        let roll = match state.roll {
            Some(r) if side == state.to_move => r,
            _ => return vec![],
        };

        let mut moves = Vec::new();
        for from in state.pieces(side) {
            if required_throw(from).is_some_and(|needed| needed != roll) {
                continue;
            }

            let target = from + roll;
            if from < BEAUTY && target > BEAUTY {
                continue;
            }

            let mut mv = SenetMove {
                from,
                to: target,
                swap: false,
                water: false,
                bears_off: false,
            };

            if target == EXIT {
                mv.bears_off = true;
            } else if target > EXIT {
                continue;
            } else if target == WATER {
                match state.rebirth_square() {
                    Some(square) => {
                        mv.to = square;
                        mv.water = true;
                    }
                    None => continue,
                }
            } else {
                match state.occupant(target) {
                    Some(owner) if owner == side => continue,
                    Some(owner) => {
                        if is_safe(target) || state.is_protected(owner, target) {
                            continue;
                        }
                        mv.swap = true;
                    }
                    None => {}
                }
            }

            moves.push(mv);
        }

        moves
    }

    fn apply_move(
        &self,
        state: &SenetState,
        mv: &SenetMove,
    ) -> GameResult<Transition<SenetState, SenetSwap>> {
        self.ensure_legal(state, mv)?;

        let side = state.to_move;
        let roll = state.roll.unwrap_or_default();
        let mut next = state.clone();
        let mut captures = SmallVec::new();

        next.squares[mv.from as usize] = None;
        if mv.bears_off {
            next.borne_off[side] += 1;
        } else {
            if mv.swap {
                next.squares[mv.from as usize] = Some(side.other());
                captures.push(SenetSwap {
                    from: mv.to,
                    to: mv.from,
                });
            }
            next.squares[mv.to as usize] = Some(side);
        }
        next.roll = None;

        // Drowning cancels the throw's extra turn.
        let extra_turn = !mv.water && matches!(roll, 1 | 4 | 5);
        if !extra_turn && !self.outcome(&next).is_terminal() {
            next.to_move = side.other();
        }

        Ok(Transition {
            state: next,
            captures,
            extra_turn,
        })
    }

    fn outcome(&self, state: &SenetState) -> Outcome {
        Side::BOTH
            .into_iter()
            .find(|&side| state.borne_off[side] as usize == PIECES)
            .map_or(Outcome::Ongoing, Outcome::Winner)
    }

    fn validate_state(&self, state: &SenetState) -> GameResult<()> {
        if let Some(roll) = state.roll.filter(|&r| !Dice::SENET.can_show(r)) {
            return Err(GameError::invalid_state(GameKind::Senet, format!("throw of {roll}")));
        }
        for side in Side::BOTH {
            let total = state.on_board(side) + usize::from(state.borne_off[side]);
            if total != PIECES {
                return Err(GameError::invalid_state(
                    GameKind::Senet,
                    format!("{side} has {total} pieces"),
                ));
            }
        }
        Ok(())
    }

    fn select_ai_move(
        &self,
        state: &SenetState,
        side: Side,
        _difficulty: Difficulty,
        _rng: &mut GameRng,
    ) -> GameResult<SenetMove> {
        ai::select(&self.legal_moves(state, side)).ok_or(GameError::NoLegalMove {
            game: GameKind::Senet,
            side,
        })
    }

    fn dice(&self) -> Option<Dice> {
        Some(Dice::SENET)
    }

    fn awaiting_roll(&self, state: &SenetState) -> bool {
        state.roll.is_none() && !self.outcome(state).is_terminal()
    }

    fn with_roll(&self, state: &SenetState, value: u8) -> GameResult<SenetState> {
        if !self.awaiting_roll(state) {
            return Err(GameError::RollNotExpected);
        }
        if !Dice::SENET.can_show(value) {
            return Err(GameError::InvalidRoll { value });
        }
        Ok(SenetState {
            roll: Some(value),
            ..state.clone()
        })
    }

    fn pass_turn(&self, state: &SenetState) -> GameResult<SenetState> {
        if !self.must_pass(state) {
            return Err(GameError::CannotPass { side: state.to_move });
        }
        Ok(SenetState {
            roll: None,
            to_move: state.to_move.other(),
            ..state.clone()
        })
    }
}
