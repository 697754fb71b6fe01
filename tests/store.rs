//! Integration tests for the in-memory record store.

use champion_system_web::{
    Championship, ChampionshipStore, Game, InMemoryStore, Phase, StoreError, Team,
};
use uuid::Uuid;

fn seeded() -> (InMemoryStore, Uuid) {
    let store = InMemoryStore::new();
    let championship = Championship::new("Copa Teste", 2, "admin-1");
    let id = championship.id;
    store.insert_championship(championship).unwrap();
    (store, id)
}

fn round_robin(championship: Uuid, teams: &[Uuid]) -> Vec<Game> {
    let mut games = Vec::new();
    for (i, &home) in teams.iter().enumerate() {
        for &away in &teams[i + 1..] {
            games.push(Game::new(championship, Phase::Groups, home, away));
        }
    }
    games
}

#[test]
fn regenerating_fixtures_replaces_instead_of_appending() {
    let (store, ch) = seeded();
    let teams: Vec<Uuid> = (1..=4).map(Uuid::from_u128).collect();

    let first = round_robin(ch, &teams);
    store.replace_games(ch, Phase::Groups, first).unwrap();
    let second = round_robin(ch, &teams);
    store.replace_games(ch, Phase::Groups, second.clone()).unwrap();

    let stored = store.games(ch, Phase::Groups).unwrap();
    assert_eq!(stored.len(), 6, "regeneration must not pile up fixtures");
    let mut stored_ids: Vec<Uuid> = stored.iter().map(|g| g.id).collect();
    let mut second_ids: Vec<Uuid> = second.iter().map(|g| g.id).collect();
    stored_ids.sort();
    second_ids.sort();
    assert_eq!(stored_ids, second_ids);
}

#[test]
fn fixtures_with_recorded_results_cannot_be_replaced() {
    let (store, ch) = seeded();
    let teams: Vec<Uuid> = (1..=4).map(Uuid::from_u128).collect();

    let first = round_robin(ch, &teams);
    let played = first[0].id;
    store.replace_games(ch, Phase::Groups, first).unwrap();
    store.record_result(played, 2, 1).unwrap();

    let err = store
        .replace_games(ch, Phase::Groups, round_robin(ch, &teams))
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));

    // The recorded fixture survives untouched.
    let stored = store.games(ch, Phase::Groups).unwrap();
    assert_eq!(stored.len(), 6);
    let game = store.game(played).unwrap();
    assert!(game.finished);
    assert_eq!(game.score(), Some((2, 1)));
}

#[test]
fn team_count_follows_team_updates() {
    let (store, a) = seeded();
    let other = Championship::new("Copa B", 2, "admin-1");
    let b = other.id;
    store.insert_championship(other).unwrap();

    let mut team = Team::new("Time 1");
    team.championship_id = Some(a);
    let team_id = team.id;
    store.insert_team(team).unwrap();
    assert_eq!(store.championship(a).unwrap().team_count, 1);

    let mut moved = store.team(team_id).unwrap();
    moved.championship_id = Some(b);
    store.update_team(moved).unwrap();
    assert_eq!(store.championship(a).unwrap().team_count, 0);
    assert_eq!(store.championship(b).unwrap().team_count, 1);

    let mut released = store.team(team_id).unwrap();
    released.championship_id = None;
    store.update_team(released).unwrap();
    assert_eq!(store.championship(b).unwrap().team_count, 0);
}

#[test]
fn moving_a_team_to_a_missing_championship_is_not_found() {
    let (store, a) = seeded();
    let mut team = Team::new("Time 1");
    team.championship_id = Some(a);
    let team_id = team.id;
    store.insert_team(team).unwrap();

    let mut moved = store.team(team_id).unwrap();
    moved.championship_id = Some(Uuid::from_u128(999));
    assert_eq!(
        store.update_team(moved),
        Err(StoreError::NotFound("championship"))
    );
    // Nothing changed.
    assert_eq!(store.team(team_id).unwrap().championship_id, Some(a));
    assert_eq!(store.championship(a).unwrap().team_count, 1);
}
