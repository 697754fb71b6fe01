//! Game (match) data structure.

use crate::models::championship::{ChampionshipId, Phase};
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a game.
pub type GameId = Uuid;

/// A single game between two teams within one championship phase.
/// Scores are absent until recorded; once `finished` is set the score is
/// immutable.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub championship_id: ChampionshipId,
    pub phase: Phase,
    pub home_team: TeamId,
    pub away_team: TeamId,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub finished: bool,
}

impl Game {
    /// Create an unplayed game for the given phase.
    pub fn new(championship_id: ChampionshipId, phase: Phase, home_team: TeamId, away_team: TeamId) -> Self {
        Self {
            id: Uuid::new_v4(),
            championship_id,
            phase,
            home_team,
            away_team,
            home_score: None,
            away_score: None,
            finished: false,
        }
    }

    /// Record the final score and mark the game finished.
    /// Returns `false` (and changes nothing) if the game was already finished.
    pub fn record_result(&mut self, home_score: u32, away_score: u32) -> bool {
        if self.finished {
            return false;
        }
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.finished = true;
        true
    }

    /// Recorded score pair, if any.
    pub fn score(&self) -> Option<(u32, u32)> {
        match (self.home_score, self.away_score) {
            (Some(h), Some(a)) => Some((h, a)),
            _ => None,
        }
    }

    /// Winner of the game, `None` for a draw or an unplayed game.
    pub fn winner(&self) -> Option<TeamId> {
        let (h, a) = self.score()?;
        if h > a {
            Some(self.home_team)
        } else if a > h {
            Some(self.away_team)
        } else {
            None
        }
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team == team || self.away_team == team
    }
}
