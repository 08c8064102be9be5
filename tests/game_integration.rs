//! Multi-match integration tests.
//!
//! These tests drive full scripted matches through the public API and
//! verify determinism, termination, and state consistency.
//!
//! Run with: cargo test --release game_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use formica::game::{
    check_invariants, Coord, FixedLayout, GameConfig, Layout, Outcome, Player, TurnEngine,
};
use formica::replay::{Recording, ReplayEngine};
use formica::runner::{config_for_seed, run_match, run_series};

#[test]
fn test_multiple_seeds_no_panic() {
    let base = GameConfig::default();

    for seed in 0..50 {
        let result = run_match(seed, &base);
        assert!(result.is_ok(), "Seed {seed} caused error: {:?}", result.err());
    }
}

#[test]
fn test_matches_reach_terminal_outcome() {
    let base = GameConfig::default();

    for seed in 0..20 {
        let result = run_match(seed, &base).unwrap();
        assert!(
            result.outcome.is_terminal(),
            "seed {seed} did not finish: {:?}",
            result.outcome
        );
        assert!(result.turns_played <= 51);
    }
}

#[test]
fn test_repeat_runs_are_bit_exact() {
    let base = GameConfig::default();

    for seed in [0, 1, 42, 0xDEAD_BEEF] {
        let a = run_match(seed, &base).unwrap();
        let b = run_match(seed, &base).unwrap();
        assert_eq!(a, b, "seed {seed} diverged between runs");
    }
}

#[test]
fn test_series_matches_individual_runs() {
    let base = GameConfig::default();

    let series = run_series(&base, 0..12).unwrap();
    for result in &series {
        let solo = run_match(result.seed, &base).unwrap();
        assert_eq!(*result, solo);
    }
}

#[test]
fn test_invariants_hold_across_seeds() {
    for seed in 0..10 {
        let config = GameConfig::with_seed(seed);
        let mut engine = TurnEngine::new(config).unwrap();

        while engine.outcome() == Outcome::Ongoing {
            formica::game::play_turn_silent(&mut engine).unwrap();
            let violations = check_invariants(&engine);
            assert!(
                violations.is_empty(),
                "seed {seed} turn {}: {violations:?}",
                engine.turn()
            );
        }
    }
}

#[test]
fn test_larger_board_match() {
    let config = GameConfig {
        width: 24,
        height: 20,
        ants_per_player: 10,
        food_count: 20,
        max_turns: Some(200),
        ..GameConfig::default()
    };

    let result = run_match(7, &config).unwrap();
    assert!(result.outcome.is_terminal());
    assert!(result.turns_played <= 201);
}

#[test]
fn test_recording_roundtrip_replays_identically() {
    let base = GameConfig::default();
    let config = config_for_seed(&base, 31);
    let expected = run_match(31, &base).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.json");
    Recording::new(config).save(&path).unwrap();
    let recording = Recording::load(&path).unwrap();

    let mut replay = ReplayEngine::new(recording).unwrap();
    while !replay.is_game_over() {
        replay.step_forward().unwrap();
    }

    assert_eq!(replay.engine().outcome(), expected.outcome);
    assert_eq!(replay.engine().scores(), expected.scores);
    assert_eq!(replay.engine().turn(), expected.turns_played);
}

#[test]
fn test_manual_pickup_and_delivery_through_api() {
    let layout = FixedLayout {
        anthills: vec![
            (Player::One, vec![Coord::new(0, 0)]),
            (Player::Two, vec![Coord::new(9, 9)]),
        ],
        ants: vec![
            (Player::One, Coord::new(0, 2)),
            (Player::Two, Coord::new(9, 7)),
        ],
        food: vec![Coord::new(0, 3)],
    };
    let mut engine = TurnEngine::new(GameConfig {
        layout: Layout::Fixed(layout),
        ..GameConfig::default()
    })
    .unwrap();

    // Walk down to the food, then carry it back to the anthill.
    engine.select(Coord::new(0, 2)).unwrap();
    engine.move_to(Coord::new(0, 3)).unwrap();
    let carrier = engine.world().ant_at(Coord::new(0, 3)).unwrap();
    assert!(engine.world().ant(carrier).unwrap().carrying_food);

    for target_y in [2, 1, 0] {
        engine.end_turn().unwrap();
        engine.end_turn().unwrap();
        engine.select(Coord::new(0, target_y + 1)).unwrap();
        engine.move_to(Coord::new(0, target_y)).unwrap();
    }

    assert_eq!(engine.score(Player::One), 1);
    assert!(!engine.world().ant(carrier).unwrap().carrying_food);
    // The only food item is now delivered, so the match is decided.
    assert_eq!(engine.outcome(), Outcome::Player1Wins);
}
