//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What moves are legal
//! - How moves change the board
//! - Win/loss/draw conditions
//! - How the built-in AI picks a move

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::Debug;

use crate::core::{Dice, Difficulty, GameError, GameKind, GameResult, GameRng, Side};

/// Result of a game, computed from the board alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game continues.
    #[default]
    Ongoing,
    /// Single winner.
    Winner(Side),
    /// Draw (Mancala equal stores).
    Draw,
}

impl Outcome {
    /// Check if the game has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The winning side, if any.
    #[must_use]
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Winner(side) => Some(side),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(self, side: Side) -> bool {
        self.winner() == Some(side)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "ongoing"),
            Outcome::Winner(side) => write!(f, "{} wins", side),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// The result of applying one legal move.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<S, C> {
    /// Board after the move.
    pub state: S,
    /// Pieces (or seeds) taken by this move.
    /// SmallVec avoids allocation for the common zero-to-few capture case.
    pub captures: SmallVec<[C; 4]>,
    /// The mover keeps the turn (rosette, 1/4/5 throw, mill, own store).
    pub extra_turn: bool,
}

/// Rules engine trait.
///
/// Engines are stateless rule books: every method is a pure function of the
/// state it is given. Board ownership lives in `GameSession`.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Return empty vec if the side can't act; never fail
/// - `apply_move`: Must re-derive legality and reject anything not listed by
///   `legal_moves` for the side to move
/// - `outcome`: Must not depend on anything outside the state
/// - `validate_state`: Bounds every count and index the other methods rely on
/// - Dice games override `dice`, `awaiting_roll`, `with_roll` and `pass_turn`
pub trait RulesEngine {
    /// Complete board position, including side to move and pending roll.
    type State: Clone + Debug + PartialEq + Serialize + DeserializeOwned;

    /// One legal transition.
    type Move: Clone + Debug + PartialEq + Serialize + DeserializeOwned;

    /// What a capture reports (a piece, a square, or a seed count).
    type Capture: Clone + Debug + PartialEq;

    /// Which game this engine implements.
    fn kind(&self) -> GameKind;

    /// Canonical starting position, first player to move.
    fn initial_state(&self) -> Self::State;

    /// Side whose turn it is.
    fn side_to_move(&self, state: &Self::State) -> Side;

    /// All moves available to `side` in `state`.
    fn legal_moves(&self, state: &Self::State, side: Side) -> Vec<Self::Move>;

    /// Apply a move for the side to move, returning the next state.
    fn apply_move(
        &self,
        state: &Self::State,
        mv: &Self::Move,
    ) -> GameResult<Transition<Self::State, Self::Capture>>;

    /// Check if the game is over.
    fn outcome(&self, state: &Self::State) -> Outcome;

    /// Reject a position that no sequence of legal moves can reach.
    ///
    /// Positions from outside the engine (snapshots, saved games) go through
    /// this before any other method sees them; the rest of the trait assumes
    /// it has passed.
    fn validate_state(&self, state: &Self::State) -> GameResult<()>;

    /// Pick a move for `side` with the built-in heuristic.
    ///
    /// Fails with `NoLegalMove` if `legal_moves` is empty.
    fn select_ai_move(
        &self,
        state: &Self::State,
        side: Side,
        difficulty: Difficulty,
        rng: &mut GameRng,
    ) -> GameResult<Self::Move>;

    // === Dice ===

    /// The dice thrown at the start of every turn, if the game uses any.
    fn dice(&self) -> Option<Dice> {
        None
    }

    /// Check if the side to move still has to throw.
    fn awaiting_roll(&self, _state: &Self::State) -> bool {
        false
    }

    /// Record the throw for the side to move.
    fn with_roll(&self, _state: &Self::State, _value: u8) -> GameResult<Self::State> {
        Err(GameError::RollNotExpected)
    }

    /// End a turn that has no legal move (zero throw or fully blocked).
    fn pass_turn(&self, state: &Self::State) -> GameResult<Self::State> {
        Err(GameError::CannotPass {
            side: self.side_to_move(state),
        })
    }

    // === Convenience Methods ===

    /// Reject moves that are not playable right now.
    ///
    /// Default implementation checks the outcome, the dice protocol and
    /// membership in `legal_moves` for the side to move.
    fn ensure_legal(&self, state: &Self::State, mv: &Self::Move) -> GameResult<()> {
        let outcome = self.outcome(state);
        if outcome.is_terminal() {
            return Err(GameError::GameOver { outcome });
        }
        if self.awaiting_roll(state) {
            return Err(GameError::RollRequired);
        }

        let side = self.side_to_move(state);
        if self.legal_moves(state, side).contains(mv) {
            Ok(())
        } else {
            Err(GameError::illegal(
                self.kind(),
                format!("{:?} is not available to {}", mv, side),
            ))
        }
    }

    /// Check if the side to move is stuck after its throw.
    fn must_pass(&self, state: &Self::State) -> bool {
        !self.outcome(state).is_terminal()
            && !self.awaiting_roll(state)
            && self.legal_moves(state, self.side_to_move(state)).is_empty()
    }
}
