//! Fixture generation: group-stage round-robin, and the opening bracket for
//! knockout-only championships.

use crate::logic::bracket::build_bracket;
use crate::logic::EngineError;
use crate::models::{Championship, Game, Phase, Team, TeamId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate the group-stage fixture list: every pair of approved teams plays
/// once, in shuffled order with randomized home/away sides.
///
/// Only teams registered to this championship and approved participate.
pub fn generate_group_games(
    championship: &Championship,
    teams: &[Team],
) -> Result<Vec<Game>, EngineError> {
    if championship.current_phase != Phase::Groups {
        return Err(EngineError::Configuration(
            "Fixtures can only be generated in the group phase".into(),
        ));
    }

    let eligible = eligible_team_ids(championship, teams);
    if eligible.len() < 2 {
        return Err(EngineError::Configuration(format!(
            "Need at least 2 approved teams to generate fixtures (have {})",
            eligible.len()
        )));
    }

    let mut rng = rand::thread_rng();
    let mut pairings: Vec<(TeamId, TeamId)> = Vec::new();
    for (i, &a) in eligible.iter().enumerate() {
        for &b in &eligible[i + 1..] {
            if rng.gen::<bool>() {
                pairings.push((a, b));
            } else {
                pairings.push((b, a));
            }
        }
    }
    pairings.shuffle(&mut rng);

    Ok(pairings
        .into_iter()
        .map(|(home, away)| Game::new(championship.id, Phase::Groups, home, away))
        .collect())
}

/// Opening fixtures for a knockout-only championship: seed the approved
/// teams straight into the current knockout phase, in registration order.
pub fn generate_opening_bracket(
    championship: &Championship,
    teams: &[Team],
) -> Result<Vec<Game>, EngineError> {
    let phase = championship.current_phase;
    if phase == Phase::Groups || phase.is_terminal() {
        return Err(EngineError::Configuration(
            "Opening bracket requires an open knockout phase".into(),
        ));
    }
    let eligible = eligible_team_ids(championship, teams);
    build_bracket(championship.id, &eligible, phase, None)
}

/// Teams registered to this championship and approved, in input order.
fn eligible_team_ids(championship: &Championship, teams: &[Team]) -> Vec<TeamId> {
    teams
        .iter()
        .filter(|t| t.approved && t.championship_id == Some(championship.id))
        .map(|t| t.id)
        .collect()
}
