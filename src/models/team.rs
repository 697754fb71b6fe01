//! Team and Player data structures.

use crate::models::championship::ChampionshipId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// A team. Belongs to at most one active championship at a time
/// (`championship_id` is nullable until assigned).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub championship_id: Option<ChampionshipId>,
    pub name: String,
    /// Set by the administrator; only approved teams enter fixtures.
    pub approved: bool,
    /// External identity of the user managing this team, for notification targeting.
    pub owner_user_id: Option<String>,
}

impl Team {
    /// Create an unapproved team with no championship assigned.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            championship_id: None,
            name: name.into(),
            approved: false,
            owner_user_id: None,
        }
    }

    pub fn approve(&mut self) {
        self.approved = true;
    }
}

/// A player. Team membership is required.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    /// Identity document number (e.g. CPF).
    pub document: String,
    pub birth_date: Option<NaiveDate>,
}

impl Player {
    pub fn new(team_id: TeamId, name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_id,
            name: name.into(),
            document: document.into(),
            birth_date: None,
        }
    }
}
