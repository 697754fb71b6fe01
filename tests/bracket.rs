//! Integration tests for the bracket builder.

use champion_system_web::{build_bracket, EngineError, Phase, TeamId};
use uuid::Uuid;

fn seeds(n: usize) -> Vec<TeamId> {
    (1..=n as u128).map(Uuid::from_u128).collect()
}

#[test]
fn four_qualifiers_pair_1v4_and_2v3() {
    let ch = Uuid::from_u128(100);
    let q = seeds(4);
    let bracket = build_bracket(ch, &q, Phase::SemiFinals, None).unwrap();
    assert_eq!(bracket.len(), 2);
    assert_eq!((bracket[0].home_team, bracket[0].away_team), (q[0], q[3]));
    assert_eq!((bracket[1].home_team, bracket[1].away_team), (q[1], q[2]));
    assert!(bracket.iter().all(|g| g.phase == Phase::SemiFinals && !g.finished));
}

#[test]
fn every_qualifier_appears_in_exactly_one_match() {
    let ch = Uuid::from_u128(100);
    let q = seeds(8);
    let bracket = build_bracket(ch, &q, Phase::QuarterFinals, None).unwrap();
    assert_eq!(bracket.len(), 4);
    let mut seen: Vec<TeamId> = bracket
        .iter()
        .flat_map(|g| [g.home_team, g.away_team])
        .collect();
    seen.sort();
    let mut expected = q.clone();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn top_two_seeds_never_meet_before_the_final() {
    let ch = Uuid::from_u128(100);
    for n in [4usize, 8, 16] {
        let q = seeds(n);
        let bracket = build_bracket(ch, &q, Phase::QuarterFinals, None).unwrap();
        assert!(!bracket
            .iter()
            .any(|g| g.involves(q[0]) && g.involves(q[1])));
    }
    // A two-team bracket is the final itself: 1 vs 2 is the only match.
    let q = seeds(2);
    let final_bracket = build_bracket(ch, &q, Phase::Final, None).unwrap();
    assert_eq!(final_bracket.len(), 1);
    assert!(final_bracket[0].involves(q[0]) && final_bracket[0].involves(q[1]));
}

#[test]
fn non_power_of_two_has_no_implicit_byes() {
    let ch = Uuid::from_u128(100);
    assert_eq!(
        build_bracket(ch, &seeds(6), Phase::QuarterFinals, None),
        Err(EngineError::BracketSize(6))
    );
    assert_eq!(
        build_bracket(ch, &seeds(1), Phase::Final, None),
        Err(EngineError::BracketSize(1))
    );
    assert_eq!(
        build_bracket(ch, &[], Phase::Final, None),
        Err(EngineError::BracketSize(0))
    );
}

#[test]
fn closed_target_builds_nothing() {
    let ch = Uuid::from_u128(100);
    let bracket = build_bracket(ch, &seeds(2), Phase::Closed, None).unwrap();
    assert!(bracket.is_empty());
}

#[test]
fn explicit_seeding_order_overrides_qualifier_order() {
    let ch = Uuid::from_u128(100);
    let q = seeds(4);
    let order = vec![q[3], q[2], q[1], q[0]];
    let bracket = build_bracket(ch, &q, Phase::SemiFinals, Some(&order)).unwrap();
    assert_eq!((bracket[0].home_team, bracket[0].away_team), (q[3], q[0]));
    assert_eq!((bracket[1].home_team, bracket[1].away_team), (q[2], q[1]));
}

#[test]
fn seeding_order_must_be_a_permutation_of_the_qualifiers() {
    let ch = Uuid::from_u128(100);
    let q = seeds(4);

    let short = vec![q[0], q[1]];
    assert!(matches!(
        build_bracket(ch, &q, Phase::SemiFinals, Some(&short)),
        Err(EngineError::Configuration(_))
    ));

    let stranger = vec![q[0], q[1], q[2], Uuid::from_u128(99)];
    assert!(matches!(
        build_bracket(ch, &q, Phase::SemiFinals, Some(&stranger)),
        Err(EngineError::Configuration(_))
    ));
}

#[test]
fn duplicate_qualifiers_are_rejected() {
    let ch = Uuid::from_u128(100);
    let q = seeds(4);
    let doubled = vec![q[0], q[1], q[1], q[2]];
    assert!(matches!(
        build_bracket(ch, &doubled, Phase::SemiFinals, None),
        Err(EngineError::Configuration(_))
    ));
}
