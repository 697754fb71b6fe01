//! Standing: a team's computed record within a phase. Derived from games,
//! never stored as source of truth.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// One row of a phase standings table (for API / display and qualification).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team: TeamId,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl Standing {
    /// Empty record for a team that has not played yet.
    pub fn empty(team: TeamId) -> Self {
        Self {
            team,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Ranking key: points, then goal difference, then goals scored (all
    /// descending). Two standings with equal keys are truly tied; only a
    /// head-to-head result between exactly two teams can separate them.
    pub fn rank_key(&self) -> (u32, i64, u32) {
        (self.points, self.goal_difference(), self.goals_for)
    }
}
