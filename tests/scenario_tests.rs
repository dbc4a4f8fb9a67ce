//! Worked examples for each game, played through a `GameSession`.

use ancient_games::games::hnefatafl::board::{Piece, Square, THRONE};
use ancient_games::games::morris::MorrisPhase;
use ancient_games::games::senet::board::{BEAUTY, REBIRTH, WATER};
use ancient_games::{
    EndReason, GameSession, HnefataflGame, HnefataflMove, HnefataflState, MancalaGame, MancalaMove, MorrisGame,
    MorrisMove, Outcome, PlayMode, RulesEngine, SenetGame, SenetState, SessionConfig, SessionEvent, Side,
    SideMap, Snapshot, UrGame,
};

fn local() -> SessionConfig {
    SessionConfig::default().with_mode(PlayMode::Local)
}

// =============================================================================
// Ur
// =============================================================================

#[test]
fn test_ur_two_then_one() {
    let mut session = GameSession::new(UrGame, local());

    session.apply_roll(Side::A, 2).unwrap();
    let moves = session.legal_moves(Side::A);
    assert_eq!(moves.len(), 1);
    assert_eq!((moves[0].from, moves[0].to), (-1, 1));
    assert!(!moves[0].rosette);

    session.submit(Side::A, moves[0]).unwrap();
    assert_eq!(session.side_to_move(), Side::B);

    session.apply_roll(Side::B, 1).unwrap();
    let moves = session.legal_moves(Side::B);
    assert_eq!((moves[0].from, moves[0].to), (-1, 0));
    session.submit(Side::B, moves[0]).unwrap();
    assert_eq!(session.side_to_move(), Side::A);

    let events = session.take_events();
    assert!(events.contains(&SessionEvent::TurnChanged { side: Side::B }));
    assert!(events.contains(&SessionEvent::TurnChanged { side: Side::A }));
    assert_eq!(session.moves_played(), 2);
}

// =============================================================================
// Mancala
// =============================================================================

#[test]
fn test_mancala_sow_into_store() {
    let mut session = GameSession::new(MancalaGame, local());
    session.submit(Side::A, MancalaMove { pit: 2 }).unwrap();

    assert_eq!(session.state().pits, [4, 4, 0, 5, 5, 5, 1, 4, 4, 4, 4, 4, 4, 0]);
    assert_eq!(session.side_to_move(), Side::A);
    assert!(matches!(
        session.take_events().as_slice(),
        [SessionEvent::MoveApplied { extra_turn: true, .. }]
    ));
}

// =============================================================================
// Morris
// =============================================================================

#[test]
fn test_morris_mill_lists_all_removals() {
    let mut session = GameSession::new(MorrisGame, local());
    let script = [
        (Side::A, 0),
        (Side::B, 9),
        (Side::A, 1),
        (Side::B, 13),
        (Side::A, 2),
    ];
    for (side, pos) in script {
        session.submit(side, MorrisMove::Place { pos }).unwrap();
    }

    assert!(session.state().pending_removal);
    assert_eq!(session.state().phase(Side::A), MorrisPhase::Placing);
    let removals = session.legal_moves(Side::A);
    assert_eq!(removals.len(), 2);
    for pos in [9, 13] {
        assert!(removals.contains(&MorrisMove::Remove { pos }));
    }

    session.submit(Side::A, MorrisMove::Remove { pos: 13 }).unwrap();
    assert_eq!(session.side_to_move(), Side::B);
    assert_eq!(session.state().on_board(Side::B), 1);
}

// =============================================================================
// Hnefatafl
// =============================================================================

#[test]
fn test_hnefatafl_king_needs_fourth_attacker() {
    let mut state = HnefataflState::empty();
    state.set(THRONE, Some(Piece::King));
    state.set(Square::new(4, 5), Some(Piece::Attacker));
    state.set(Square::new(6, 5), Some(Piece::Attacker));
    state.set(Square::new(5, 6), Some(Piece::Attacker));
    state.set(Square::new(2, 4), Some(Piece::Attacker));
    state.set(Square::new(9, 1), Some(Piece::Defender));

    let mut session = GameSession::new(HnefataflGame, local());
    session
        .restore(Snapshot {
            game: HnefataflGame.kind(),
            state,
            resigned: None,
            moves: 0,
        })
        .unwrap();
    assert_eq!(session.outcome(), Outcome::Ongoing);

    session
        .submit(
            Side::A,
            HnefataflMove {
                from: Square::new(2, 4),
                to: Square::new(5, 4),
            },
        )
        .unwrap();

    assert_eq!(session.outcome(), Outcome::Winner(Side::A));
    assert!(session.take_events().contains(&SessionEvent::GameEnded {
        outcome: Outcome::Winner(Side::A),
        reason: EndReason::Rules,
    }));
    assert_eq!(session.outcome_notice().unwrap().moves, 1);
}

// =============================================================================
// Senet
// =============================================================================

#[test]
fn test_senet_water_relocates_without_extra_turn() {
    let mut squares = [None; 30];
    squares[BEAUTY as usize] = Some(Side::A);
    squares[0] = Some(Side::B);
    let state = SenetState {
        squares,
        borne_off: SideMap::from_pair(4, 4),
        to_move: Side::A,
        roll: None,
    };

    let mut session = GameSession::new(SenetGame, local());
    session
        .restore(Snapshot {
            game: SenetGame.kind(),
            state,
            resigned: None,
            moves: 30,
        })
        .unwrap();

    session.apply_roll(Side::A, 1).unwrap();
    let moves = session.legal_moves(Side::A);
    let water = moves.iter().find(|m| m.water).copied().unwrap();
    session.submit(Side::A, water).unwrap();

    assert_eq!(session.state().squares[REBIRTH as usize], Some(Side::A));
    assert_eq!(session.state().squares[WATER as usize], None);
    assert_eq!(session.side_to_move(), Side::B);
    assert_eq!(session.moves_played(), 31);
}
