//! Bracket Builder: pairs qualified teams into the next phase's matches.

use crate::logic::EngineError;
use crate::models::{ChampionshipId, Game, Phase, TeamId};

/// Build the match list for `target` from an ordered qualifier set.
///
/// Seeding is standard (1 vs N, 2 vs N-1, ...) so top seeds cannot meet before
/// the final. The qualifier order is the seed order unless an explicit
/// `seeding` permutation is supplied. Every qualifier lands in exactly one
/// match; the higher seed is the home team.
///
/// Fails with `BracketSize` unless the qualifier count is a power of two of at
/// least 2 - byes are never assigned implicitly. `target == Closed` yields an
/// empty bracket (nothing left to play).
pub fn build_bracket(
    championship_id: ChampionshipId,
    qualified: &[TeamId],
    target: Phase,
    seeding: Option<&[TeamId]>,
) -> Result<Vec<Game>, EngineError> {
    if target == Phase::Closed {
        return Ok(Vec::new());
    }

    let seeds: Vec<TeamId> = match seeding {
        Some(order) => {
            if order.len() != qualified.len() {
                return Err(EngineError::Configuration(format!(
                    "Seeding order has {} entries for {} qualified teams",
                    order.len(),
                    qualified.len()
                )));
            }
            for team in order {
                if !qualified.contains(team) {
                    return Err(EngineError::Configuration(format!(
                        "Seeding order names team {} which did not qualify",
                        team
                    )));
                }
            }
            order.to_vec()
        }
        None => qualified.to_vec(),
    };

    // Deny duplicates: each qualifier must appear exactly once.
    for (i, team) in seeds.iter().enumerate() {
        if seeds[..i].contains(team) {
            return Err(EngineError::Configuration(format!(
                "Team {} appears more than once in the qualifier set",
                team
            )));
        }
    }

    let n = seeds.len();
    if n < 2 || !n.is_power_of_two() {
        return Err(EngineError::BracketSize(n));
    }

    let games = (0..n / 2)
        .map(|i| Game::new(championship_id, target, seeds[i], seeds[n - 1 - i]))
        .collect();
    Ok(games)
}
