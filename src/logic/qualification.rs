//! Qualification Selector: top-N cutoff over ranked standings.

use crate::logic::standings::{head_to_head_points, PointsRule};
use crate::logic::EngineError;
use crate::models::{Game, Phase, Standing, TeamId};

/// How many teams advance out of a phase. The configured qualified count
/// applies to the group stage; every knockout phase advances half its
/// participants (its match winners).
pub fn qualifier_target(phase: Phase, qualified_count: usize, participants: usize) -> usize {
    match phase {
        Phase::Groups => qualified_count,
        _ => participants / 2,
    }
}

/// Select the top `count` teams from ranked standings.
///
/// Deterministic: identical standings always yield identical output. A tie at
/// the cutoff boundary is never resolved by dropping a team arbitrarily - if
/// the boundary falls inside a tie group (and no two-team head-to-head result
/// settles it), this fails with `TiebreakRequired` naming every tied team.
pub fn select_qualifiers(
    standings: &[Standing],
    games: &[Game],
    count: usize,
    rule: &PointsRule,
) -> Result<Vec<TeamId>, EngineError> {
    if count == 0 {
        return Err(EngineError::Configuration(
            "Qualified count must be a positive integer".into(),
        ));
    }
    if count > standings.len() {
        return Err(EngineError::Configuration(format!(
            "Qualified count {} exceeds the {} participating teams",
            count,
            standings.len()
        )));
    }

    if count < standings.len() {
        let cutoff_key = standings[count - 1].rank_key();
        if standings[count].rank_key() == cutoff_key {
            let tied: Vec<TeamId> = standings
                .iter()
                .filter(|s| s.rank_key() == cutoff_key)
                .map(|s| s.team)
                .collect();
            // A two-team tie is settled by head-to-head (the calculator already
            // ordered the pair); anything else needs external resolution.
            if tied.len() != 2 {
                return Err(EngineError::TiebreakRequired(tied));
            }
            let (points_a, points_b) = head_to_head_points(tied[0], tied[1], games, rule);
            if points_a == points_b {
                return Err(EngineError::TiebreakRequired(tied));
            }
        }
    }

    Ok(standings[..count].iter().map(|s| s.team).collect())
}
