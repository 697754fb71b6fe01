//! Phase Transition Controller: the only mutating entry point of the engine.

use crate::logic::bracket::build_bracket;
use crate::logic::qualification::{qualifier_target, select_qualifiers};
use crate::logic::standings::{compute_standings, PointsRule};
use crate::logic::EngineError;
use crate::models::{ChampionshipId, Phase, Status, TeamId};
use crate::store::ChampionshipStore;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The unit handed to the notification dispatcher after a committed advance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhaseTransition {
    pub championship_id: ChampionshipId,
    pub from: Phase,
    pub to: Phase,
    /// Teams advancing to the new phase (the champion alone for a closure).
    pub qualified: Vec<TeamId>,
    pub occurred_at: DateTime<Utc>,
}

/// Advance a championship to its next phase.
///
/// Validates that every game of the current phase is finished, computes
/// standings, selects qualifiers, builds the next phase's bracket, and commits
/// everything through the store in a single compare-and-swap on the current
/// phase. Nothing is written until every prior step has succeeded, so a
/// failed attempt leaves the championship untouched and a retry from the same
/// pre-state produces the same outcome.
///
/// `Final -> Closed` marks the championship finished and builds no bracket;
/// the returned event then carries the champion as its single qualifier.
pub fn try_advance(
    store: &dyn ChampionshipStore,
    id: ChampionshipId,
    rule: &PointsRule,
) -> Result<PhaseTransition, EngineError> {
    let championship = store.championship(id)?;
    if !championship.is_open() {
        return Err(EngineError::AlreadyClosed);
    }
    let from = championship.current_phase;
    let to = from.next().ok_or(EngineError::AlreadyClosed)?;

    let games = store.games(id, from)?;
    if games.is_empty() {
        return Err(EngineError::Configuration(format!(
            "No games recorded for the {}",
            from.label()
        )));
    }
    let remaining = games.iter().filter(|g| !g.finished).count();
    if remaining > 0 {
        return Err(EngineError::PhaseIncomplete { remaining });
    }

    let standings = compute_standings(&games, rule)?;
    let count = qualifier_target(from, championship.qualified_count, standings.len());
    let qualified = select_qualifiers(&standings, &games, count, rule)?;

    if to == Phase::Closed {
        store.commit_transition(id, from, to, Some(Status::Finished), Vec::new())?;
    } else {
        let bracket = build_bracket(id, &qualified, to, None)?;
        store.commit_transition(id, from, to, None, bracket)?;
    }

    Ok(PhaseTransition {
        championship_id: id,
        from,
        to,
        qualified,
        occurred_at: Utc::now(),
    })
}
