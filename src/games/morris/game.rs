//! Nine Men's Morris rules.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

use super::ai;
use super::board::{mills_through, ADJACENT, FLYING_AT, MILLS, PIECES, POINTS};
use crate::core::{Difficulty, GameError, GameKind, GameResult, GameRng, Side, SideMap};
use crate::rules::{Outcome, RulesEngine, Transition};

/// What a side may do with its pieces this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MorrisPhase {
    /// Pieces left in hand.
    Placing,
    /// Slide to an adjacent empty point.
    Moving,
    /// Down to three pieces: jump to any empty point.
    Flying,
}

/// Morris board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorrisState {
    pub board: [Option<Side>; POINTS],
    /// Pieces each side has yet to place.
    pub in_hand: SideMap<u8>,
    pub to_move: Side,
    /// The side to move closed a mill and must now take a piece.
    pub pending_removal: bool,
}

impl MorrisState {
    /// Pieces of `side` on the board.
    #[must_use]
    pub fn on_board(&self, side: Side) -> u8 {
        self.board.iter().filter(|&&p| p == Some(side)).count() as u8
    }

    #[must_use]
    pub fn phase(&self, side: Side) -> MorrisPhase {
        if self.in_hand[side] > 0 {
            MorrisPhase::Placing
        } else if self.on_board(side) == FLYING_AT {
            MorrisPhase::Flying
        } else {
            MorrisPhase::Moving
        }
    }

    /// Check if both sides have placed all their pieces.
    #[must_use]
    pub fn placing_done(&self) -> bool {
        self.in_hand.iter().all(|(_, &n)| n == 0)
    }

    /// Check if `point` completes a mill for `side`.
    #[must_use]
    pub fn in_mill(&self, point: u8, side: Side) -> bool {
        mills_through(point).any(|line| line.iter().all(|&p| self.board[p as usize] == Some(side)))
    }

    /// Every point of `side` that sits inside one of its mills.
    fn milled_points(&self, side: Side) -> FxHashSet<u8> {
        MILLS
            .iter()
            .filter(|line| line.iter().all(|&p| self.board[p as usize] == Some(side)))
            .flatten()
            .copied()
            .collect()
    }

    /// Pieces of `side` the opponent may take.
    ///
    /// Pieces inside a mill are protected unless every piece is.
    #[must_use]
    pub fn removable(&self, side: Side) -> Vec<u8> {
        let milled = self.milled_points(side);
        let pieces: Vec<u8> = self.points_of(side).collect();
        if pieces.iter().all(|p| milled.contains(p)) {
            return pieces;
        }
        pieces.into_iter().filter(|p| !milled.contains(p)).collect()
    }

    fn points_of(&self, side: Side) -> impl Iterator<Item = u8> + '_ {
        (0..POINTS as u8).filter(move |&p| self.board[p as usize] == Some(side))
    }

    fn empty_points(&self) -> impl Iterator<Item = u8> + '_ {
        (0..POINTS as u8).filter(move |&p| self.board[p as usize].is_none())
    }
}

/// A single Morris action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MorrisMove {
    Place { pos: u8 },
    Move { from: u8, to: u8 },
    /// Take an opposing piece after closing a mill.
    Remove { pos: u8 },
}

impl MorrisMove {
    /// Point the mover's piece ends up on, if any.
    #[must_use]
    pub fn target(self) -> Option<u8> {
        match self {
            MorrisMove::Place { pos } => Some(pos),
            MorrisMove::Move { to, .. } => Some(to),
            MorrisMove::Remove { .. } => None,
        }
    }
}

/// A piece taken off the board after a mill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorrisCapture {
    pub pos: u8,
    pub side: Side,
}

/// Nine Men's Morris. Side A places first.
#[derive(Clone, Copy, Debug, Default)]
pub struct MorrisGame;

impl MorrisGame {
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for MorrisGame {
    type State = MorrisState;
    type Move = MorrisMove;
    type Capture = MorrisCapture;

    fn kind(&self) -> GameKind {
        GameKind::Morris
    }

    fn initial_state(&self) -> MorrisState {
        MorrisState {
            board: [None; POINTS],
            in_hand: SideMap::with_value(PIECES),
            to_move: Side::A,
            pending_removal: false,
        }
    }

    fn side_to_move(&self, state: &MorrisState) -> Side {
        state.to_move
    }

    fn legal_moves(&self, state: &MorrisState, side: Side) -> Vec<MorrisMove> {
        if side != state.to_move {
            return vec![];
        }
        if state.pending_removal {
            return state
                .removable(side.other())
                .into_iter()
                .map(|pos| MorrisMove::Remove { pos })
                .collect();
        }

        match state.phase(side) {
            MorrisPhase::Placing => state.empty_points().map(|pos| MorrisMove::Place { pos }).collect(),
            MorrisPhase::Flying => state
                .points_of(side)
                .flat_map(|from| state.empty_points().map(move |to| MorrisMove::Move { from, to }))
                .collect(),
            MorrisPhase::Moving => state
                .points_of(side)
                .flat_map(|from| {
                    ADJACENT[from as usize]
                        .iter()
                        .filter(|&&to| state.board[to as usize].is_none())
                        .map(move |&to| MorrisMove::Move { from, to })
                })
                .collect(),
        }
    }

    fn apply_move(
        &self,
        state: &MorrisState,
        mv: &MorrisMove,
    ) -> GameResult<Transition<MorrisState, MorrisCapture>> {
        self.ensure_legal(state, mv)?;

        let side = state.to_move;
        let mut next = state.clone();

        let landed = match *mv {
            MorrisMove::Remove { pos } => {
                next.board[pos as usize] = None;
                next.pending_removal = false;
                next.to_move = side.other();
                return Ok(Transition {
                    state: next,
                    captures: smallvec![MorrisCapture {
                        pos,
                        side: side.other(),
                    }],
                    extra_turn: false,
                });
            }
            MorrisMove::Place { pos } => {
                next.board[pos as usize] = Some(side);
                next.in_hand[side] -= 1;
                pos
            }
            MorrisMove::Move { from, to } => {
                next.board[from as usize] = None;
                next.board[to as usize] = Some(side);
                to
            }
        };

        // A mill with nothing to take just ends the turn
        let extra_turn = next.in_mill(landed, side) && !next.removable(side.other()).is_empty();
        if extra_turn {
            next.pending_removal = true;
        } else {
            next.to_move = side.other();
        }

        Ok(Transition {
            state: next,
            captures: smallvec![],
            extra_turn,
        })
    }

    fn outcome(&self, state: &MorrisState) -> Outcome {
        if state.placing_done() {
            if let Some(&loser) = Side::BOTH.iter().find(|&&s| state.on_board(s) < FLYING_AT) {
                return Outcome::Winner(loser.other());
            }
        }
        if !state.pending_removal && self.legal_moves(state, state.to_move).is_empty() {
            return Outcome::Winner(state.to_move.other());
        }
        Outcome::Ongoing
    }

    fn validate_state(&self, state: &MorrisState) -> GameResult<()> {
        for side in Side::BOTH {
            let total = u32::from(state.on_board(side)) + u32::from(state.in_hand[side]);
            if total > u32::from(PIECES) {
                return Err(GameError::invalid_state(
                    GameKind::Morris,
                    format!("{side} has {total} pieces"),
                ));
            }
        }
        Ok(())
    }

    fn select_ai_move(
        &self,
        state: &MorrisState,
        side: Side,
        difficulty: Difficulty,
        rng: &mut GameRng,
    ) -> GameResult<MorrisMove> {
        let moves = self.legal_moves(state, side);
        ai::select(state, side, &moves, difficulty, rng).ok_or(GameError::NoLegalMove {
            game: GameKind::Morris,
            side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: &MorrisState, mv: MorrisMove) -> MorrisState {
        MorrisGame.apply_move(state, &mv).unwrap().state
    }

    /// Moving-phase position with the given points occupied.
    fn position(a: &[u8], b: &[u8], to_move: Side) -> MorrisState {
        let mut state = MorrisGame.initial_state();
        state.in_hand = SideMap::with_value(0);
        state.to_move = to_move;
        for &p in a {
            state.board[p as usize] = Some(Side::A);
        }
        for &p in b {
            state.board[p as usize] = Some(Side::B);
        }
        state
    }

    #[test]
    fn test_initial_placing() {
        let state = MorrisGame.initial_state();
        let moves = MorrisGame.legal_moves(&state, Side::A);
        assert_eq!(moves.len(), POINTS);
        assert!(MorrisGame.legal_moves(&state, Side::B).is_empty());
        assert_eq!(state.phase(Side::A), MorrisPhase::Placing);
        assert_eq!(MorrisGame.outcome(&state), Outcome::Ongoing);
    }

    #[test]
    fn test_mill_lists_every_unprotected_piece() {
        let mut state = MorrisGame.initial_state();
        for mv in [
            MorrisMove::Place { pos: 0 },
            MorrisMove::Place { pos: 8 },
            MorrisMove::Place { pos: 1 },
            MorrisMove::Place { pos: 20 },
        ] {
            state = play(&state, mv);
        }

        let t = MorrisGame.apply_move(&state, &MorrisMove::Place { pos: 2 }).unwrap();
        assert!(t.extra_turn);
        assert!(t.state.pending_removal);
        assert_eq!(t.state.to_move, Side::A);

        let mut removals = MorrisGame.legal_moves(&t.state, Side::A);
        removals.sort_by_key(|m| match m {
            MorrisMove::Remove { pos } => *pos,
            _ => u8::MAX,
        });
        assert_eq!(
            removals,
            vec![MorrisMove::Remove { pos: 8 }, MorrisMove::Remove { pos: 20 }]
        );

        let t = MorrisGame.apply_move(&t.state, &removals[0]).unwrap();
        assert_eq!(t.captures.as_slice(), &[MorrisCapture { pos: 8, side: Side::B }]);
        assert_eq!(t.state.to_move, Side::B);
        assert_eq!(t.state.on_board(Side::B), 1);
        assert!(!t.state.pending_removal);
    }

    #[test]
    fn test_pieces_in_mills_are_protected() {
        let mut state = position(&[0, 1, 2, 20], &[8, 9, 10, 5], Side::A);
        state.pending_removal = true;
        assert_eq!(MorrisGame.legal_moves(&state, Side::A), vec![MorrisMove::Remove { pos: 5 }]);

        // All pieces milled: any may go
        let mut state = position(&[0, 1, 2, 20], &[8, 9, 10], Side::A);
        state.pending_removal = true;
        assert_eq!(MorrisGame.legal_moves(&state, Side::A).len(), 3);
    }

    #[test]
    fn test_mill_with_nothing_to_take_ends_turn() {
        let mut state = MorrisGame.initial_state();
        state.in_hand = SideMap::from_pair(1, 0);
        state.board[0] = Some(Side::A);
        state.board[1] = Some(Side::A);

        let t = MorrisGame.apply_move(&state, &MorrisMove::Place { pos: 2 }).unwrap();
        assert!(!t.extra_turn);
        assert!(!t.state.pending_removal);
        assert_eq!(t.state.to_move, Side::B);
    }

    #[test]
    fn test_sliding_only_to_adjacent_points() {
        let state = position(&[0, 4, 16, 20], &[1, 12, 18, 22], Side::A);
        let moves = MorrisGame.legal_moves(&state, Side::A);
        assert!(moves.contains(&MorrisMove::Move { from: 0, to: 7 }));
        assert!(!moves.contains(&MorrisMove::Move { from: 0, to: 1 }));
        assert!(!moves.contains(&MorrisMove::Move { from: 0, to: 10 }));
        assert!(moves.iter().all(|m| matches!(m, MorrisMove::Move { .. })));
    }

    #[test]
    fn test_three_pieces_fly() {
        let state = position(&[0, 4, 16], &[1, 12, 18, 22], Side::A);
        assert_eq!(state.phase(Side::A), MorrisPhase::Flying);
        assert_eq!(state.phase(Side::B), MorrisPhase::Moving);
        // 3 pieces × 17 empty points
        assert_eq!(MorrisGame.legal_moves(&state, Side::A).len(), 3 * 17);
        assert!(MorrisGame
            .legal_moves(&state, Side::A)
            .contains(&MorrisMove::Move { from: 0, to: 10 }));
    }

    #[test]
    fn test_mill_can_be_reformed() {
        let mut state = position(&[0, 1, 3, 16, 22], &[8, 10, 12, 14, 19], Side::A);

        state = play(&state, MorrisMove::Move { from: 3, to: 2 });
        assert!(state.pending_removal);
        state = play(&state, MorrisMove::Remove { pos: 19 });
        state = play(&state, MorrisMove::Move { from: 8, to: 9 });
        state = play(&state, MorrisMove::Move { from: 2, to: 3 });
        assert!(!state.pending_removal);
        state = play(&state, MorrisMove::Move { from: 9, to: 8 });

        // Same mill again, another capture
        let t = MorrisGame.apply_move(&state, &MorrisMove::Move { from: 3, to: 2 }).unwrap();
        assert!(t.extra_turn);
        let state = play(&t.state, MorrisMove::Remove { pos: 12 });
        assert_eq!(state.on_board(Side::B), 3);
        assert_eq!(MorrisGame.outcome(&state), Outcome::Ongoing);
    }

    #[test]
    fn test_fewer_than_three_loses() {
        let mut state = position(&[0, 1, 2, 20], &[8, 9, 12], Side::A);
        state.pending_removal = true;
        let state = play(&state, MorrisMove::Remove { pos: 12 });
        assert_eq!(MorrisGame.outcome(&state), Outcome::Winner(Side::A));
        assert!(matches!(
            MorrisGame.apply_move(&state, &MorrisMove::Move { from: 8, to: 15 }),
            Err(GameError::GameOver { .. })
        ));
    }

    #[test]
    fn test_low_count_ignored_while_placing() {
        let mut state = MorrisGame.initial_state();
        state = play(&state, MorrisMove::Place { pos: 0 });
        assert_eq!(state.on_board(Side::B), 0);
        assert_eq!(MorrisGame.outcome(&state), Outcome::Ongoing);
    }

    #[test]
    fn test_blocked_side_loses() {
        let state = position(&[0, 1, 2, 4], &[7, 9, 3, 5], Side::A);
        assert!(MorrisGame.legal_moves(&state, Side::A).is_empty());
        assert_eq!(MorrisGame.outcome(&state), Outcome::Winner(Side::B));
    }

    #[test]
    fn test_wrong_side_rejected() {
        let state = MorrisGame.initial_state();
        let result = MorrisGame.apply_move(&state, &MorrisMove::Move { from: 0, to: 1 });
        assert!(matches!(result, Err(GameError::IllegalMove { .. })));
    }

    #[test]
    fn test_validate_state() {
        let state = MorrisGame.initial_state();
        assert!(MorrisGame.validate_state(&state).is_ok());

        let mut bad = state.clone();
        bad.board[0] = Some(Side::A);
        assert!(matches!(MorrisGame.validate_state(&bad), Err(GameError::InvalidState { .. })));

        bad.in_hand[Side::A] = 8;
        assert!(MorrisGame.validate_state(&bad).is_ok());

        let mut bad = state;
        bad.in_hand[Side::B] = 255;
        assert!(MorrisGame.validate_state(&bad).is_err());
    }
}
