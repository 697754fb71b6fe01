//! Standings Calculator: derives a ranked table from a phase's completed games.
//!
//! Pure and deterministic: identical input always yields the identical table.

use crate::logic::EngineError;
use crate::models::{Game, Standing, TeamId};
use std::collections::BTreeMap;

/// Points awarded per result. Injected at construction so alternate formats
/// (e.g. 2-point wins) don't require touching the calculator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PointsRule {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl Default for PointsRule {
    fn default() -> Self {
        Self { win: 3, draw: 1, loss: 0 }
    }
}

impl PointsRule {
    pub fn new(win: u32, draw: u32, loss: u32) -> Self {
        Self { win, draw, loss }
    }
}

/// Compute the ranked standings for a set of completed games.
///
/// Ranking: points desc, goal difference desc, goals scored desc; when exactly
/// two teams share all three, their head-to-head record decides; larger tie
/// groups stay in stable (team-id) order and count as equally ranked.
///
/// Fails with `IncompleteData` if any game is unfinished or lacks a score.
pub fn compute_standings(games: &[Game], rule: &PointsRule) -> Result<Vec<Standing>, EngineError> {
    // BTreeMap keeps the pre-sort order deterministic across runs.
    let mut table: BTreeMap<TeamId, Standing> = BTreeMap::new();

    for game in games {
        if !game.finished {
            return Err(EngineError::IncompleteData(game.id));
        }
        let (home_goals, away_goals) = game
            .score()
            .ok_or(EngineError::IncompleteData(game.id))?;

        record(&mut table, game.home_team, home_goals, away_goals, rule);
        record(&mut table, game.away_team, away_goals, home_goals, rule);
    }

    let mut standings: Vec<Standing> = table.into_values().collect();
    standings.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
    apply_head_to_head(&mut standings, games, rule);
    Ok(standings)
}

/// Accumulate one team's side of a result into the table.
fn record(
    table: &mut BTreeMap<TeamId, Standing>,
    team: TeamId,
    scored: u32,
    conceded: u32,
    rule: &PointsRule,
) {
    let entry = table.entry(team).or_insert_with(|| Standing::empty(team));
    entry.played += 1;
    entry.goals_for += scored;
    entry.goals_against += conceded;
    if scored > conceded {
        entry.wins += 1;
        entry.points += rule.win;
    } else if scored < conceded {
        entry.losses += 1;
        entry.points += rule.loss;
    } else {
        entry.draws += 1;
        entry.points += rule.draw;
    }
}

/// Reorder exact two-team ties by their mutual results. Ties of three or more
/// teams are left as-is (equally ranked, resolved externally).
fn apply_head_to_head(standings: &mut [Standing], games: &[Game], rule: &PointsRule) {
    let mut i = 0;
    while i < standings.len() {
        let mut j = i + 1;
        while j < standings.len() && standings[j].rank_key() == standings[i].rank_key() {
            j += 1;
        }
        if j - i == 2 {
            let (a, b) = (standings[i].team, standings[i + 1].team);
            let (points_a, points_b) = head_to_head_points(a, b, games, rule);
            if points_b > points_a {
                standings.swap(i, i + 1);
            }
        }
        i = j;
    }
}

/// Points each of two teams earned in their mutual games (per `rule`).
/// `(0, 0)` when they never met.
pub fn head_to_head_points(a: TeamId, b: TeamId, games: &[Game], rule: &PointsRule) -> (u32, u32) {
    let mut points_a = 0;
    let mut points_b = 0;
    for game in games.iter().filter(|g| g.involves(a) && g.involves(b)) {
        match game.winner() {
            Some(w) if w == a => points_a += rule.win,
            Some(w) if w == b => points_b += rule.win,
            Some(_) => {}
            None => {
                if game.score().is_some() {
                    points_a += rule.draw;
                    points_b += rule.draw;
                }
            }
        }
    }
    (points_a, points_b)
}
