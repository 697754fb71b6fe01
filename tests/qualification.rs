//! Integration tests for the qualification selector.

use champion_system_web::{
    compute_standings, qualifier_target, select_qualifiers, EngineError, Game, Phase, PointsRule,
};
use uuid::Uuid;

fn played(championship: Uuid, home: Uuid, away: Uuid, home_score: u32, away_score: u32) -> Game {
    let mut game = Game::new(championship, Phase::Groups, home, away);
    assert!(game.record_result(home_score, away_score));
    game
}

/// Full round robin where earlier teams beat later ones: a 9 pts, b 6, c 3, d 0.
fn decided_group() -> (Vec<Game>, [Uuid; 4]) {
    let ch = Uuid::from_u128(100);
    let teams = [
        Uuid::from_u128(1),
        Uuid::from_u128(2),
        Uuid::from_u128(3),
        Uuid::from_u128(4),
    ];
    let mut games = Vec::new();
    for (i, &home) in teams.iter().enumerate() {
        for &away in &teams[i + 1..] {
            games.push(played(ch, home, away, 1, 0));
        }
    }
    (games, teams)
}

#[test]
fn selects_top_n_by_rank() {
    let (games, [a, b, _, _]) = decided_group();
    let rule = PointsRule::default();
    let standings = compute_standings(&games, &rule).unwrap();
    assert_eq!(standings[0].points, 9);
    let qualified = select_qualifiers(&standings, &games, 2, &rule).unwrap();
    assert_eq!(qualified, vec![a, b]);
}

#[test]
fn identical_standings_yield_identical_qualifiers() {
    let (games, _) = decided_group();
    let rule = PointsRule::default();
    let standings = compute_standings(&games, &rule).unwrap();
    let first = select_qualifiers(&standings, &games, 3, &rule).unwrap();
    let second = select_qualifiers(&standings, &games, 3, &rule).unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_count_is_a_configuration_error() {
    let (games, _) = decided_group();
    let rule = PointsRule::default();
    let standings = compute_standings(&games, &rule).unwrap();
    assert!(matches!(
        select_qualifiers(&standings, &games, 0, &rule),
        Err(EngineError::Configuration(_))
    ));
}

#[test]
fn count_beyond_participants_is_a_configuration_error() {
    let (games, _) = decided_group();
    let rule = PointsRule::default();
    let standings = compute_standings(&games, &rule).unwrap();
    assert!(matches!(
        select_qualifiers(&standings, &games, 5, &rule),
        Err(EngineError::Configuration(_))
    ));
}

#[test]
fn four_way_tie_at_the_cutoff_requires_a_tiebreak() {
    // Every game drawn 1-1: four teams all on 3 pts, gd 0, 3 goals.
    let ch = Uuid::from_u128(100);
    let teams = [
        Uuid::from_u128(1),
        Uuid::from_u128(2),
        Uuid::from_u128(3),
        Uuid::from_u128(4),
    ];
    let mut games = Vec::new();
    for (i, &home) in teams.iter().enumerate() {
        for &away in &teams[i + 1..] {
            games.push(played(ch, home, away, 1, 1));
        }
    }
    let rule = PointsRule::default();
    let standings = compute_standings(&games, &rule).unwrap();
    match select_qualifiers(&standings, &games, 3, &rule) {
        Err(EngineError::TiebreakRequired(tied)) => {
            assert_eq!(tied.len(), 4);
            for team in teams {
                assert!(tied.contains(&team));
            }
        }
        other => panic!("expected TiebreakRequired, got {:?}", other),
    }
}

#[test]
fn two_way_cutoff_tie_settled_by_head_to_head() {
    let ch = Uuid::from_u128(100);
    let (a, b, c, d) = (
        Uuid::from_u128(1),
        Uuid::from_u128(2),
        Uuid::from_u128(3),
        Uuid::from_u128(4),
    );
    // b and a share points/gd/goals but b won their meeting; cutoff at 2.
    let games = vec![
        played(ch, b, a, 1, 0),
        played(ch, c, b, 1, 0),
        played(ch, a, d, 1, 0),
    ];
    let rule = PointsRule::default();
    let standings = compute_standings(&games, &rule).unwrap();
    let qualified = select_qualifiers(&standings, &games, 2, &rule).unwrap();
    assert_eq!(qualified, vec![c, b]);
}

#[test]
fn two_way_cutoff_tie_with_drawn_head_to_head_requires_a_tiebreak() {
    let ch = Uuid::from_u128(100);
    let (a, b, c) = (Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3));
    // a and b drew their meeting and are otherwise identical.
    let games = vec![
        played(ch, a, b, 1, 1),
        played(ch, a, c, 2, 0),
        played(ch, b, c, 2, 0),
    ];
    let rule = PointsRule::default();
    let standings = compute_standings(&games, &rule).unwrap();
    match select_qualifiers(&standings, &games, 1, &rule) {
        Err(EngineError::TiebreakRequired(tied)) => {
            assert_eq!(tied.len(), 2);
            assert!(tied.contains(&a) && tied.contains(&b));
        }
        other => panic!("expected TiebreakRequired, got {:?}", other),
    }
}

#[test]
fn knockout_phases_advance_half_the_field() {
    assert_eq!(qualifier_target(Phase::Groups, 8, 20), 8);
    assert_eq!(qualifier_target(Phase::RoundOf16, 8, 16), 8);
    assert_eq!(qualifier_target(Phase::QuarterFinals, 8, 8), 4);
    assert_eq!(qualifier_target(Phase::Final, 8, 2), 1);
}
