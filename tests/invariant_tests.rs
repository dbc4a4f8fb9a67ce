//! Property tests over random playouts of every engine.
//!
//! Each playout throws dice through the engine's own `Dice`, passes when the
//! throw leaves nothing to play and otherwise picks a random legal move. Along
//! the way every listed move must be accepted, the outcome must be stable and
//! every position reached must pass `validate_state`.

use ancient_games::games::ur::board::PIECES as UR_PIECES;
use ancient_games::{
    GameRng, HnefataflGame, MancalaGame, MorrisGame, Outcome, RulesEngine, SenetGame, Side, UrGame,
};
use proptest::prelude::*;

/// Upper bound on turns per playout; Hnefatafl in particular can wander.
const MAX_PLIES: usize = 300;

/// Play one random game, calling `check(before, after)` for every applied move.
fn playout<E: RulesEngine>(engine: &E, seed: u64, mut check: impl FnMut(&E::State, &E::State)) -> Outcome {
    let mut rng = GameRng::new(seed);
    let mut state = engine.initial_state();

    for _ in 0..MAX_PLIES {
        let outcome = engine.outcome(&state);
        assert_eq!(outcome, engine.outcome(&state), "outcome must be stable");
        if outcome.is_terminal() {
            return outcome;
        }

        if engine.awaiting_roll(&state) {
            let dice = engine.dice().expect("awaiting a roll without dice");
            let value = dice.throw(&mut rng);
            state = engine.with_roll(&state, value).expect("dice value rejected");
            if engine.must_pass(&state) {
                state = engine.pass_turn(&state).expect("pass rejected");
            }
            continue;
        }

        let side = engine.side_to_move(&state);
        let moves = engine.legal_moves(&state, side);
        assert!(!moves.is_empty(), "ongoing game with no move for {side}");
        assert!(
            engine.legal_moves(&state, side.other()).is_empty(),
            "side not to move has moves"
        );

        // Legality closure
        for mv in &moves {
            engine
                .apply_move(&state, mv)
                .unwrap_or_else(|e| panic!("listed move {mv:?} rejected: {e}"));
        }

        let mv = rng.choose(&moves).expect("non-empty").clone();
        let next = engine.apply_move(&state, &mv).expect("legal move").state;
        engine
            .validate_state(&next)
            .unwrap_or_else(|e| panic!("reachable position rejected: {e}"));
        check(&state, &next);
        state = next;
    }
    engine.outcome(&state)
}

/// Once terminal, nothing else is accepted.
fn assert_closed<E: RulesEngine>(engine: &E, seed: u64) {
    let mut last = None;
    let outcome = playout(engine, seed, |_, after| last = Some(after.clone()));
    if !outcome.is_terminal() {
        return;
    }
    let Some(state) = last else { return };
    for side in Side::BOTH {
        for mv in engine.legal_moves(&state, side) {
            assert!(engine.apply_move(&state, &mv).is_err());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn test_ur_piece_conservation(seed in any::<u64>()) {
        playout(&UrGame, seed, |_, after| {
            for side in Side::BOTH {
                assert_eq!(after.waiting(side) + after.on_path(side) + after.scored(side), UR_PIECES);
            }
        });
    }

    #[test]
    fn test_senet_piece_conservation(seed in any::<u64>()) {
        playout(&SenetGame, seed, |_, after| {
            for side in Side::BOTH {
                assert_eq!(after.on_board(side) + usize::from(after.borne_off[side]), 5);
            }
        });
    }

    #[test]
    fn test_mancala_seed_conservation(seed in any::<u64>()) {
        let outcome = playout(&MancalaGame, seed, |before, after| {
            assert_eq!(before.total_seeds(), after.total_seeds());
        });
        // Mancala always finishes well inside the ply cap
        prop_assert!(outcome.is_terminal());
    }

    #[test]
    fn test_morris_counts_never_grow(seed in any::<u64>()) {
        playout(&MorrisGame, seed, |before, after| {
            for side in Side::BOTH {
                let total = |s: &ancient_games::MorrisState| s.on_board(side) + s.in_hand[side];
                assert!(total(after) <= total(before));
            }
        });
    }

    #[test]
    fn test_hnefatafl_king_stays_unique(seed in any::<u64>()) {
        playout(&HnefataflGame, seed, |before, after| {
            assert!(after.king().is_some());
            assert!(after.count(Side::A) <= before.count(Side::A));
            assert!(after.count(Side::B) <= before.count(Side::B));
        });
    }

    #[test]
    fn test_finished_games_accept_nothing(seed in any::<u64>()) {
        assert_closed(&UrGame, seed);
        assert_closed(&SenetGame, seed);
        assert_closed(&MancalaGame, seed);
        assert_closed(&MorrisGame, seed);
        assert_closed(&HnefataflGame, seed);
    }
}
