//! Turn orchestration around a rules engine.
//!
//! A `GameSession` owns the only copy of the board. Every change goes through
//! `&mut self`, so moves from the local player, the AI and the remote peer
//! are applied one at a time. Remote traffic that arrives while the caller is
//! busy can be parked with `enqueue_remote` and applied later with
//! `drain_inbox`.

use std::collections::VecDeque;

use im::Vector;
use tracing::{debug, info, instrument, warn};

use super::events::{EndReason, LogEntry, SessionEvent};
use super::wire::{self, OutcomeNotice, Snapshot, WireMessage};
use crate::core::{GameError, GameResult, GameRng, PlayMode, SessionConfig, Side};
use crate::rules::{Outcome, RulesEngine};

/// Events emitted by a session over engine `E`.
pub type EventOf<E> = SessionEvent<<E as RulesEngine>::Move, <E as RulesEngine>::Capture>;

/// Wire messages exchanged by sessions over engine `E`.
pub type WireOf<E> = WireMessage<<E as RulesEngine>::Move, <E as RulesEngine>::State>;

/// Where an action came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    Local,
    Ai,
    Remote,
}

/// One game in progress.
pub struct GameSession<E: RulesEngine> {
    engine: E,
    config: SessionConfig,
    state: E::State,
    resigned: Option<Side>,
    dice_rng: GameRng,
    ai_rng: GameRng,
    log: Vector<LogEntry<E::Move>>,
    /// Moves played before the last restore.
    base_moves: u32,
    inbox: VecDeque<Vec<u8>>,
    outbox: Vec<Vec<u8>>,
    events: Vec<EventOf<E>>,
}

impl<E: RulesEngine> GameSession<E> {
    /// Start a game from the engine's initial position.
    #[instrument(skip(engine), fields(game = %engine.kind()))]
    pub fn new(engine: E, config: SessionConfig) -> Self {
        info!("creating game session");
        let root = GameRng::new(config.seed);
        Self {
            state: engine.initial_state(),
            dice_rng: root.for_context("dice"),
            ai_rng: root.for_context("ai"),
            engine,
            config,
            resigned: None,
            log: Vector::new(),
            base_moves: 0,
            inbox: VecDeque::new(),
            outbox: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Back to the initial position with fresh random streams.
    #[instrument(skip(self), fields(game = %self.engine.kind()))]
    pub fn reset(&mut self) {
        info!("resetting game session");
        let root = GameRng::new(self.config.seed);
        self.state = self.engine.initial_state();
        self.resigned = None;
        self.dice_rng = root.for_context("dice");
        self.ai_rng = root.for_context("ai");
        self.log = Vector::new();
        self.base_moves = 0;
        self.inbox.clear();
        self.outbox.clear();
        self.events.clear();
        self.events.push(SessionEvent::TurnChanged {
            side: self.side_to_move(),
        });
    }

    // === Queries ===

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &E::State {
        &self.state
    }

    /// Current result. A resignation overrides the board.
    pub fn outcome(&self) -> Outcome {
        match self.resigned {
            Some(side) => Outcome::Winner(side.other()),
            None => self.engine.outcome(&self.state),
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.engine.side_to_move(&self.state)
    }

    /// Moves open to `side` right now. Empty once the game is over.
    pub fn legal_moves(&self, side: Side) -> Vec<E::Move> {
        if self.outcome().is_terminal() {
            return vec![];
        }
        self.engine.legal_moves(&self.state, side)
    }

    /// Check if the side to move still has to throw.
    pub fn awaiting_roll(&self) -> bool {
        !self.outcome().is_terminal() && self.engine.awaiting_roll(&self.state)
    }

    /// Check if the AI should act now.
    pub fn is_ai_turn(&self) -> bool {
        !self.outcome().is_terminal() && self.config.ai_side() == Some(self.side_to_move())
    }

    /// Full history since the start (or the last restore).
    pub fn move_log(&self) -> &Vector<LogEntry<E::Move>> {
        &self.log
    }

    /// Board moves played so far.
    pub fn moves_played(&self) -> u32 {
        self.base_moves + self.log.iter().filter(|entry| entry.is_move()).count() as u32
    }

    /// Result summary for the identity collaborator, once the game is over.
    pub fn outcome_notice(&self) -> Option<OutcomeNotice> {
        let outcome = self.outcome();
        outcome.is_terminal().then(|| OutcomeNotice {
            game: self.engine.kind(),
            outcome,
            reason: self.end_reason(),
            moves: self.moves_played(),
        })
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<EventOf<E>> {
        std::mem::take(&mut self.events)
    }

    /// Drain encoded messages waiting to be sent to the peer.
    pub fn take_outbox(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.outbox)
    }

    // === Local actions ===

    /// Throw the dice for the local side to move.
    #[instrument(skip(self), fields(game = %self.engine.kind()))]
    pub fn roll(&mut self) -> GameResult<u8> {
        let side = self.side_to_move();
        self.check_local(side)?;
        let dice = self.engine.dice().ok_or(GameError::RollNotExpected)?;
        self.check_roll(side)?;

        let value = dice.throw(&mut self.dice_rng);
        self.record_roll(side, value, Origin::Local)?;
        Ok(value)
    }

    /// Record a throw made outside the session (physical dice, replays).
    #[instrument(skip(self), fields(game = %self.engine.kind()))]
    pub fn apply_roll(&mut self, side: Side, value: u8) -> GameResult<()> {
        self.check_local(side)?;
        self.record_roll(side, value, Origin::Local)
    }

    /// Play a move for a side controlled on this device.
    #[instrument(skip(self), fields(game = %self.engine.kind()))]
    pub fn submit(&mut self, side: Side, mv: E::Move) -> GameResult<Outcome> {
        self.check_local(side)?;
        self.apply(side, mv, Origin::Local)
    }

    /// Resign on behalf of a local side.
    #[instrument(skip(self), fields(game = %self.engine.kind()))]
    pub fn resign(&mut self, side: Side) -> GameResult<()> {
        self.check_local(side)?;
        self.record_resignation(side, Origin::Local)
    }

    /// Let the AI take its turn: throw if needed, then move.
    ///
    /// Returns the move played, or `None` when the throw left nothing to play.
    #[instrument(skip(self), fields(game = %self.engine.kind(), difficulty = %self.config.difficulty))]
    pub fn play_ai_turn(&mut self) -> GameResult<Option<E::Move>> {
        let side = self.side_to_move();
        if !self.is_ai_turn() {
            self.check_ongoing()?;
            return Err(match self.config.ai_side() {
                Some(ai) => GameError::NotYourTurn {
                    expected: side,
                    got: ai,
                },
                None => GameError::NoAiSide {
                    mode: self.config.mode,
                },
            });
        }

        if self.engine.awaiting_roll(&self.state) {
            if let Some(dice) = self.engine.dice() {
                let value = dice.throw(&mut self.dice_rng);
                self.record_roll(side, value, Origin::Ai)?;
            }
            if self.side_to_move() != side || !self.is_ai_turn() {
                return Ok(None);
            }
        }

        let mv = self
            .engine
            .select_ai_move(&self.state, side, self.config.difficulty, &mut self.ai_rng)?;
        debug!(?mv, "ai selected move");
        self.apply(side, mv.clone(), Origin::Ai)?;
        Ok(Some(mv))
    }

    /// Queue the current position for a joining or reconnecting peer.
    pub fn share_snapshot(&mut self) -> GameResult<()> {
        let message: WireOf<E> = WireMessage::Snapshot(self.snapshot());
        self.outbox.push(wire::encode(self.engine.kind(), &message)?);
        Ok(())
    }

    // === Remote actions ===

    /// Apply one message from the peer.
    ///
    /// Anything that does not fit the local board is reported as `Desync`
    /// (plus a `ResyncRequired` event) and leaves the board untouched.
    #[instrument(skip(self, bytes), fields(game = %self.engine.kind(), len = bytes.len()))]
    pub fn receive(&mut self, bytes: &[u8]) -> GameResult<()> {
        let message: WireOf<E> = wire::decode(self.engine.kind(), bytes)?;
        let result = match message {
            WireMessage::Roll { side, value } => self
                .check_remote(side)
                .and_then(|()| self.record_roll(side, value, Origin::Remote)),
            WireMessage::Move { side, mv } => self
                .check_remote(side)
                .and_then(|()| self.apply(side, mv, Origin::Remote).map(|_| ())),
            WireMessage::Resign { side } => self
                .check_remote(side)
                .and_then(|()| self.record_resignation(side, Origin::Remote)),
            WireMessage::Snapshot(snapshot) => self.restore(snapshot),
            WireMessage::Ended(notice) => {
                let local = self.outcome();
                if notice.outcome == local {
                    Ok(())
                } else {
                    Err(GameError::Desync {
                        reason: format!("peer reports {}, local board is {}", notice.outcome, local),
                    })
                }
            }
        };

        result.map_err(|err| self.desync(err))
    }

    /// Park a peer message until `drain_inbox`.
    pub fn enqueue_remote(&mut self, bytes: Vec<u8>) {
        self.inbox.push_back(bytes);
    }

    /// Apply parked peer messages in arrival order.
    ///
    /// Stops at the first failure and drops whatever is still queued, since
    /// later messages were built on a board this session does not have.
    pub fn drain_inbox(&mut self) -> GameResult<usize> {
        let mut applied = 0;
        while let Some(bytes) = self.inbox.pop_front() {
            if let Err(err) = self.receive(&bytes) {
                self.inbox.clear();
                return Err(err);
            }
            applied += 1;
        }
        Ok(applied)
    }

    // === Snapshots ===

    pub fn snapshot(&self) -> Snapshot<E::State> {
        Snapshot {
            game: self.engine.kind(),
            state: self.state.clone(),
            resigned: self.resigned,
            moves: self.moves_played(),
        }
    }

    /// Replace the board with a snapshot. History restarts from it.
    ///
    /// The position is checked with `RulesEngine::validate_state` first; a
    /// rejected snapshot leaves the session as it was.
    #[instrument(skip(self, snapshot), fields(game = %self.engine.kind()))]
    pub fn restore(&mut self, snapshot: Snapshot<E::State>) -> GameResult<()> {
        let expected = self.engine.kind();
        if snapshot.game != expected {
            return Err(GameError::WrongGame {
                expected,
                got: snapshot.game,
            });
        }
        self.engine.validate_state(&snapshot.state)?;
        // Sessions pass a blocked turn as soon as the throw is recorded
        if self.engine.must_pass(&snapshot.state) {
            return Err(GameError::invalid_state(
                expected,
                format!("{} is left without a move", self.engine.side_to_move(&snapshot.state)),
            ));
        }

        info!(moves = snapshot.moves, "restoring snapshot");
        self.state = snapshot.state;
        self.resigned = snapshot.resigned;
        self.base_moves = snapshot.moves;
        self.log = Vector::new();
        self.events.push(SessionEvent::TurnChanged {
            side: self.side_to_move(),
        });
        Ok(())
    }

    // === Internals ===

    fn check_ongoing(&self) -> GameResult<()> {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            return Err(GameError::GameOver { outcome });
        }
        Ok(())
    }

    /// Reject actions for a side driven by the AI or the peer.
    fn check_local(&self, side: Side) -> GameResult<()> {
        if self.config.ai_side() == Some(side) || self.config.remote_side() == Some(side) {
            return Err(GameError::NotYourTurn {
                expected: self.config.local_side,
                got: side,
            });
        }
        Ok(())
    }

    fn check_remote(&self, side: Side) -> GameResult<()> {
        if self.config.remote_side() != Some(side) {
            return Err(GameError::Desync {
                reason: format!("{side} is not played by the peer"),
            });
        }
        Ok(())
    }

    fn check_turn(&self, side: Side) -> GameResult<()> {
        self.check_ongoing()?;
        let expected = self.side_to_move();
        if side != expected {
            return Err(GameError::NotYourTurn { expected, got: side });
        }
        Ok(())
    }

    fn check_roll(&self, side: Side) -> GameResult<()> {
        self.check_turn(side)?;
        if !self.engine.awaiting_roll(&self.state) {
            return Err(GameError::RollNotExpected);
        }
        Ok(())
    }

    fn record_roll(&mut self, side: Side, value: u8, origin: Origin) -> GameResult<()> {
        self.check_roll(side)?;
        let rolled = self.engine.with_roll(&self.state, value)?;
        // A throw with nothing to play ends the turn on both peers alike
        let passed = if self.engine.must_pass(&rolled) {
            Some(self.engine.pass_turn(&rolled)?)
        } else {
            None
        };
        let outgoing = self.encode_for_peer(origin, || WireMessage::Roll { side, value })?;

        self.state = rolled;
        debug!(%side, value, ?origin, "dice rolled");
        self.log.push_back(LogEntry::Roll { side, value });
        self.events.push(SessionEvent::DiceRolled { side, value });
        self.outbox.extend(outgoing);

        if let Some(next) = passed {
            self.state = next;
            debug!(%side, value, "no legal move, turn passes");
            self.log.push_back(LogEntry::Pass { side });
            self.events.push(SessionEvent::TurnPassed { side });
            self.events.push(SessionEvent::TurnChanged {
                side: self.side_to_move(),
            });
        }
        Ok(())
    }

    fn apply(&mut self, side: Side, mv: E::Move, origin: Origin) -> GameResult<Outcome> {
        self.check_turn(side)?;
        let transition = self.engine.apply_move(&self.state, &mv)?;

        // Nobody has resigned while the game is ongoing, so the board decides
        let outcome = self.engine.outcome(&transition.state);
        let mut outgoing: Vec<Vec<u8>> = self
            .encode_for_peer(origin, || WireMessage::Move {
                side,
                mv: mv.clone(),
            })?
            .into_iter()
            .collect();
        if outcome.is_terminal() {
            let notice = OutcomeNotice {
                game: self.engine.kind(),
                outcome,
                reason: EndReason::Rules,
                moves: self.moves_played() + 1,
            };
            outgoing.extend(self.encode_for_peer(origin, || WireMessage::Ended(notice))?);
        }

        self.state = transition.state;
        debug!(%side, ?mv, ?origin, extra_turn = transition.extra_turn, "move applied");
        self.log.push_back(LogEntry::Move {
            side,
            mv: mv.clone(),
        });
        self.events.push(SessionEvent::MoveApplied {
            side,
            mv,
            captures: transition.captures.into_vec(),
            extra_turn: transition.extra_turn,
            remote: origin == Origin::Remote,
        });
        self.outbox.extend(outgoing);

        if outcome.is_terminal() {
            info!(%outcome, moves = self.moves_played(), "game over");
            self.events.push(SessionEvent::GameEnded {
                outcome,
                reason: EndReason::Rules,
            });
        } else if self.side_to_move() != side {
            self.events.push(SessionEvent::TurnChanged {
                side: self.side_to_move(),
            });
        }
        Ok(outcome)
    }

    fn record_resignation(&mut self, side: Side, origin: Origin) -> GameResult<()> {
        self.check_ongoing()?;
        let outgoing = self.encode_for_peer(origin, || WireMessage::Resign { side })?;

        self.resigned = Some(side);
        let outcome = self.outcome();
        info!(%side, %outcome, ?origin, "side resigned");
        self.log.push_back(LogEntry::Resign { side });
        self.events.push(SessionEvent::GameEnded {
            outcome,
            reason: EndReason::Resignation,
        });
        self.outbox.extend(outgoing);
        Ok(())
    }

    fn end_reason(&self) -> EndReason {
        if self.resigned.is_some() {
            EndReason::Resignation
        } else {
            EndReason::Rules
        }
    }

    /// Encode a message for the peer if this device made the action.
    fn encode_for_peer(
        &self,
        origin: Origin,
        message: impl FnOnce() -> WireOf<E>,
    ) -> GameResult<Option<Vec<u8>>> {
        if origin == Origin::Local && self.config.mode == PlayMode::Online {
            return wire::encode(self.engine.kind(), &message()).map(Some);
        }
        Ok(None)
    }

    fn desync(&mut self, err: GameError) -> GameError {
        let reason = match err {
            GameError::Desync { reason } => reason,
            other => other.to_string(),
        };
        warn!(%reason, "rejected remote message");
        self.events.push(SessionEvent::ResyncRequired {
            reason: reason.clone(),
        });
        GameError::Desync { reason }
    }
}
