//! The phase progression engine: standings, qualification, bracket building,
//! group fixtures, and the phase transition controller.

mod bracket;
mod qualification;
mod schedule;
mod standings;
mod transition;

pub use bracket::build_bracket;
pub use qualification::{qualifier_target, select_qualifiers};
pub use schedule::{generate_group_games, generate_opening_bracket};
pub use standings::{compute_standings, head_to_head_points, PointsRule};
pub use transition::{try_advance, PhaseTransition};

use crate::models::{GameId, TeamId};
use crate::store::StoreError;

/// Errors that can occur during engine operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// A game passed to the standings calculator lacks a recorded score.
    IncompleteData(GameId),
    /// Not all games of the current phase have been played.
    PhaseIncomplete { remaining: usize },
    /// The qualification cutoff is ambiguous; the named teams are tied and
    /// need an external tie-break decision.
    TiebreakRequired(Vec<TeamId>),
    /// Invalid configuration (qualified count, seeding order, fixture input).
    Configuration(String),
    /// Qualifier count is not a power of two >= 2; byes must be handled explicitly.
    BracketSize(usize),
    /// The championship is closed (or finished/inactive); no further transitions.
    AlreadyClosed,
    /// Persistence collaborator failure; nothing was committed.
    Store(StoreError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::IncompleteData(id) => {
                write!(f, "Game {} has no recorded score", id)
            }
            EngineError::PhaseIncomplete { remaining } => {
                write!(f, "{} game(s) of the current phase still unplayed", remaining)
            }
            EngineError::TiebreakRequired(teams) => {
                write!(f, "{} teams tied at the qualification cutoff; manual tie-break required", teams.len())
            }
            EngineError::Configuration(msg) => write!(f, "{}", msg),
            EngineError::BracketSize(n) => {
                write!(f, "Cannot build a bracket for {} teams (need a power of two, no implicit byes)", n)
            }
            EngineError::AlreadyClosed => write!(f, "Championship is closed; no further phase transitions"),
            EngineError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e)
    }
}
