//! Hnefatafl rules.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ai;
use super::board::{Piece, Square, ATTACKER_START, DEFENDER_START, DIRECTIONS, SIZE, THRONE};
use crate::core::{Difficulty, GameError, GameKind, GameResult, GameRng, Side};
use crate::rules::{Outcome, RulesEngine, Transition};

/// Hnefatafl board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnefataflState {
    /// `board[row][col]`.
    pub board: [[Option<Piece>; SIZE as usize]; SIZE as usize],
    /// Side whose turn it is.
    pub to_move: Side,
}

impl HnefataflState {
    /// A board with no pieces, attackers to move.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            board: [[None; SIZE as usize]; SIZE as usize],
            to_move: Side::A,
        }
    }

    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row as usize][square.col as usize] = piece;
    }

    /// Where the king stands.
    #[must_use]
    pub fn king(&self) -> Option<Square> {
        self.squares().find(|&sq| self.at(sq) == Some(Piece::King))
    }

    /// Number of pieces of `side` on the board (king included).
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        self.squares()
            .filter(|&sq| self.at(sq).is_some_and(|p| p.side() == side))
            .count()
    }

    fn squares(&self) -> impl Iterator<Item = Square> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Square::new(row, col)))
    }

    /// Squares the piece on `from` can slide to.
    fn destinations(&self, from: Square, piece: Piece) -> Vec<Square> {
        let mut out = Vec::new();
        for dir in DIRECTIONS {
            let mut steps = 1;
            while let Some(sq) = from.offset(dir, steps) {
                steps += 1;
                if self.at(sq).is_some() {
                    break;
                }
                if piece != Piece::King {
                    if sq.is_corner() {
                        break;
                    }
                    // Soldiers may cross an empty throne but not stop on it
                    if sq.is_throne() {
                        continue;
                    }
                }
                out.push(sq);
            }
        }
        out
    }

    /// Check if `square` counts as hostile to the king.
    fn hostile_to_king(&self, square: Square) -> bool {
        match self.at(square) {
            Some(Piece::Attacker) => true,
            Some(_) => false,
            None => square.is_corner() || square.is_throne(),
        }
    }

    /// The king is taken only when all four neighbours are hostile.
    /// A board edge is not hostile.
    #[must_use]
    pub fn king_surrounded(&self) -> bool {
        let Some(king) = self.king() else {
            return false;
        };
        DIRECTIONS.iter().all(|&dir| {
            king.offset(dir, 1)
                .is_some_and(|sq| self.hostile_to_king(sq))
        })
    }
}

/// A single Hnefatafl move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HnefataflMove {
    pub from: Square,
    pub to: Square,
}

/// A piece removed by custodian capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnefataflCapture {
    pub square: Square,
    pub piece: Piece,
}

/// 11×11 Hnefatafl. Attackers (side A) move first.
#[derive(Clone, Copy, Debug, Default)]
pub struct HnefataflGame;

impl HnefataflGame {
    pub fn new() -> Self {
        Self
    }

    /// Enemy soldiers sandwiched by the piece that just landed on `to`.
    fn custodian_captures(state: &HnefataflState, to: Square, mover: Piece) -> SmallVec<[HnefataflCapture; 4]> {
        let side = mover.side();
        let prey = match side {
            Side::A => Piece::Defender,
            Side::B => Piece::Attacker,
        };

        let mut captures = SmallVec::new();
        for dir in DIRECTIONS {
            let (Some(adj), Some(far)) = (to.offset(dir, 1), to.offset(dir, 2)) else {
                continue;
            };
            if state.at(adj) != Some(prey) {
                continue;
            }
            let anvil = match state.at(far) {
                Some(piece) => piece.side() == side,
                None => far.is_corner() || far.is_throne(),
            };
            if anvil {
                captures.push(HnefataflCapture {
                    square: adj,
                    piece: prey,
                });
            }
        }
        captures
    }
}

impl RulesEngine for HnefataflGame {
    type State = HnefataflState;
    type Move = HnefataflMove;
    type Capture = HnefataflCapture;

    fn kind(&self) -> GameKind {
        GameKind::Hnefatafl
    }

    fn initial_state(&self) -> HnefataflState {
        let mut state = HnefataflState::empty();
        for (row, col) in ATTACKER_START {
            state.set(Square::new(row, col), Some(Piece::Attacker));
        }
        for (row, col) in DEFENDER_START {
            state.set(Square::new(row, col), Some(Piece::Defender));
        }
        state.set(THRONE, Some(Piece::King));
        state
    }

    fn side_to_move(&self, state: &HnefataflState) -> Side {
        state.to_move
    }

    fn legal_moves(&self, state: &HnefataflState, side: Side) -> Vec<HnefataflMove> {
        if side != state.to_move {
            return vec![];
        }
        let mut moves = Vec::new();
        for from in state.squares() {
            let Some(piece) = state.at(from) else {
                continue;
            };
            if piece.side() != side {
                continue;
            }
            moves.extend(
                state
                    .destinations(from, piece)
                    .into_iter()
                    .map(|to| HnefataflMove { from, to }),
            );
        }
        moves
    }

    fn apply_move(
        &self,
        state: &HnefataflState,
        mv: &HnefataflMove,
    ) -> GameResult<Transition<HnefataflState, HnefataflCapture>> {
        self.ensure_legal(state, mv)?;

        let Some(piece) = state.at(mv.from) else {
            return Err(GameError::illegal(GameKind::Hnefatafl, format!("no piece on {}", mv.from)));
        };

        let mut next = state.clone();
        next.set(mv.from, None);
        next.set(mv.to, Some(piece));

        let captures = Self::custodian_captures(&next, mv.to, piece);
        for capture in &captures {
            next.set(capture.square, None);
        }
        next.to_move = state.to_move.other();

        Ok(Transition {
            state: next,
            captures,
            extra_turn: false,
        })
    }

    fn outcome(&self, state: &HnefataflState) -> Outcome {
        match state.king() {
            None => return Outcome::Winner(Side::A),
            Some(king) if king.is_corner() => return Outcome::Winner(Side::B),
            Some(_) => {}
        }
        if state.king_surrounded() {
            return Outcome::Winner(Side::A);
        }
        // A side with no legal move on its turn loses
        if self.legal_moves(state, state.to_move).is_empty() {
            return Outcome::Winner(state.to_move.other());
        }
        Outcome::Ongoing
    }

    fn validate_state(&self, state: &HnefataflState) -> GameResult<()> {
        let kings = state
            .squares()
            .filter(|&sq| state.at(sq) == Some(Piece::King))
            .count();
        if kings != 1 {
            return Err(GameError::invalid_state(
                GameKind::Hnefatafl,
                format!("{kings} kings on the board"),
            ));
        }
        let limits = [(Side::A, ATTACKER_START.len()), (Side::B, DEFENDER_START.len() + 1)];
        for (side, limit) in limits {
            if state.count(side) > limit {
                return Err(GameError::invalid_state(
                    GameKind::Hnefatafl,
                    format!("{side} has {} pieces", state.count(side)),
                ));
            }
        }
        Ok(())
    }

    fn select_ai_move(
        &self,
        state: &HnefataflState,
        side: Side,
        _difficulty: Difficulty,
        rng: &mut GameRng,
    ) -> GameResult<HnefataflMove> {
        let moves = self.legal_moves(state, side);
        ai::select(state, &moves, rng).ok_or(GameError::NoLegalMove {
            game: GameKind::Hnefatafl,
            side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hnefatafl::board::CORNERS;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col)
    }

    fn play(state: &HnefataflState, from: Square, to: Square) -> Transition<HnefataflState, HnefataflCapture> {
        HnefataflGame
            .apply_move(state, &HnefataflMove { from, to })
            .unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let state = HnefataflGame.initial_state();
        assert_eq!(state.count(Side::A), 24);
        assert_eq!(state.count(Side::B), 13);
        assert_eq!(state.king(), Some(THRONE));
        assert_eq!(state.to_move, Side::A);
        assert_eq!(HnefataflGame.outcome(&state), Outcome::Ongoing);
    }

    #[test]
    fn test_sliding_is_blocked_by_pieces() {
        let state = HnefataflGame.initial_state();
        let moves = HnefataflGame.legal_moves(&state, Side::A);
        // Attacker at (0,3) slides left to (0,1) and (0,2) but never into the corner
        assert!(moves.contains(&HnefataflMove { from: sq(0, 3), to: sq(0, 1) }));
        assert!(!moves.contains(&HnefataflMove { from: sq(0, 3), to: sq(0, 0) }));
        // Blocked by the neighbour at (0,4)
        assert!(!moves.iter().any(|m| m.from == sq(0, 3) && m.to.col > 3));
        assert!(HnefataflGame.legal_moves(&state, Side::B).is_empty());

        // The king is boxed in at the start
        let defenders = HnefataflState {
            to_move: Side::B,
            ..state
        };
        let moves = HnefataflGame.legal_moves(&defenders, Side::B);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.from != THRONE));
    }

    #[test]
    fn test_soldiers_pass_through_empty_throne() {
        let mut state = HnefataflState::empty();
        state.set(sq(9, 9), Some(Piece::King));
        state.set(sq(5, 2), Some(Piece::Attacker));

        let moves = HnefataflGame.legal_moves(&state, Side::A);
        assert!(!moves.iter().any(|m| m.to == THRONE));
        assert!(moves.contains(&HnefataflMove { from: sq(5, 2), to: sq(5, 6) }));
    }

    #[test]
    fn test_custodian_capture_between_two_attackers() {
        let mut state = HnefataflState::empty();
        state.set(sq(9, 9), Some(Piece::King));
        state.set(sq(3, 3), Some(Piece::Defender));
        state.set(sq(3, 2), Some(Piece::Attacker));
        state.set(sq(6, 4), Some(Piece::Attacker));

        let t = play(&state, sq(6, 4), sq(3, 4));
        assert_eq!(t.state.at(sq(3, 3)), None);
        assert_eq!(
            t.captures.as_slice(),
            &[HnefataflCapture { square: sq(3, 3), piece: Piece::Defender }]
        );
    }

    #[test]
    fn test_corner_and_empty_throne_are_hostile() {
        let mut state = HnefataflState::empty();
        state.set(sq(9, 9), Some(Piece::King));
        state.set(sq(0, 1), Some(Piece::Defender));
        state.set(sq(3, 2), Some(Piece::Attacker));
        let t = play(&state, sq(3, 2), sq(0, 2));
        assert_eq!(t.state.at(sq(0, 1)), None);

        let mut state = HnefataflState::empty();
        state.set(sq(9, 9), Some(Piece::King));
        state.set(sq(5, 4), Some(Piece::Defender));
        state.set(sq(2, 3), Some(Piece::Attacker));
        let t = play(&state, sq(2, 3), sq(5, 3));
        assert_eq!(t.state.at(sq(5, 4)), None);
    }

    #[test]
    fn test_edges_do_not_capture() {
        let mut state = HnefataflState::empty();
        state.set(sq(9, 9), Some(Piece::King));
        state.set(sq(0, 5), Some(Piece::Defender));
        state.set(sq(3, 4), Some(Piece::Attacker));
        state.set(sq(1, 7), Some(Piece::Attacker));
        let t = play(&state, sq(1, 7), sq(1, 5));
        assert_eq!(t.state.at(sq(0, 5)), Some(Piece::Defender));
        assert!(t.captures.is_empty());
    }

    #[test]
    fn test_king_never_taken_custodially() {
        let mut state = HnefataflState::empty();
        state.set(sq(3, 3), Some(Piece::King));
        state.set(sq(3, 2), Some(Piece::Attacker));
        state.set(sq(6, 4), Some(Piece::Attacker));
        let t = play(&state, sq(6, 4), sq(3, 4));
        assert_eq!(t.state.at(sq(3, 3)), Some(Piece::King));
        assert_eq!(HnefataflGame.outcome(&t.state), Outcome::Ongoing);
    }

    #[test]
    fn test_king_on_throne_needs_four_attackers() {
        let mut state = HnefataflState::empty();
        state.set(THRONE, Some(Piece::King));
        state.set(sq(4, 5), Some(Piece::Attacker));
        state.set(sq(6, 5), Some(Piece::Attacker));
        state.set(sq(5, 6), Some(Piece::Attacker));
        state.set(sq(8, 4), Some(Piece::Attacker));
        state.set(sq(0, 8), Some(Piece::Defender));
        assert!(!state.king_surrounded());
        assert_eq!(HnefataflGame.outcome(&state), Outcome::Ongoing);

        let t = play(&state, sq(8, 4), sq(5, 4));
        assert!(t.state.king_surrounded());
        assert_eq!(HnefataflGame.outcome(&t.state), Outcome::Winner(Side::A));
    }

    #[test]
    fn test_king_beside_empty_throne_needs_three_attackers() {
        let mut state = HnefataflState::empty();
        state.set(sq(5, 4), Some(Piece::King));
        state.set(sq(4, 4), Some(Piece::Attacker));
        state.set(sq(6, 4), Some(Piece::Attacker));
        state.set(sq(5, 3), Some(Piece::Attacker));
        assert!(state.king_surrounded());
    }

    #[test]
    fn test_king_on_edge_cannot_be_taken() {
        let mut state = HnefataflState::empty();
        state.set(sq(0, 5), Some(Piece::King));
        state.set(sq(0, 4), Some(Piece::Attacker));
        state.set(sq(0, 6), Some(Piece::Attacker));
        state.set(sq(1, 5), Some(Piece::Attacker));
        assert!(!state.king_surrounded());
    }

    #[test]
    fn test_king_escapes_to_corner() {
        let mut state = HnefataflState::empty();
        state.to_move = Side::B;
        state.set(sq(0, 5), Some(Piece::King));
        state.set(sq(8, 8), Some(Piece::Attacker));

        let escape = HnefataflMove { from: sq(0, 5), to: CORNERS[0] };
        assert!(HnefataflGame.legal_moves(&state, Side::B).contains(&escape));

        let t = HnefataflGame.apply_move(&state, &escape).unwrap();
        assert_eq!(HnefataflGame.outcome(&t.state), Outcome::Winner(Side::B));
        assert!(matches!(
            HnefataflGame.apply_move(&t.state, &escape),
            Err(GameError::GameOver { .. })
        ));
    }

    #[test]
    fn test_blocked_side_loses() {
        let mut state = HnefataflState::empty();
        state.set(sq(9, 9), Some(Piece::King));
        state.set(sq(0, 1), Some(Piece::Attacker));
        state.set(sq(0, 2), Some(Piece::Defender));
        state.set(sq(1, 1), Some(Piece::Defender));
        assert!(HnefataflGame.legal_moves(&state, Side::A).is_empty());
        assert_eq!(HnefataflGame.outcome(&state), Outcome::Winner(Side::B));
    }

    #[test]
    fn test_wrong_side_move_rejected() {
        let state = HnefataflGame.initial_state();
        let defender_move = HnefataflMove { from: sq(3, 5), to: sq(3, 4) };
        assert!(matches!(
            HnefataflGame.apply_move(&state, &defender_move),
            Err(GameError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_validate_state() {
        let state = HnefataflGame.initial_state();
        assert!(HnefataflGame.validate_state(&state).is_ok());

        let mut no_king = state.clone();
        no_king.set(THRONE, None);
        assert!(matches!(
            HnefataflGame.validate_state(&no_king),
            Err(GameError::InvalidState { .. })
        ));

        let mut two_kings = state.clone();
        two_kings.set(Square::new(0, 0), Some(Piece::King));
        assert!(HnefataflGame.validate_state(&two_kings).is_err());

        let mut crowded = state;
        crowded.set(Square::new(1, 1), Some(Piece::Attacker));
        assert!(HnefataflGame.validate_state(&crowded).is_err());
    }
}
