//! In-memory store: `RwLock`-guarded maps, one write lock per mutation so
//! `commit_transition` is atomic and the lock is released on every exit path.

use crate::models::{
    Championship, ChampionshipId, Game, GameId, Phase, Player, PlayerId, Status, Team, TeamId,
};
use crate::store::{ChampionshipStore, StoreError};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Records {
    championships: HashMap<ChampionshipId, Championship>,
    teams: HashMap<TeamId, Team>,
    players: HashMap<PlayerId, Player>,
    games: HashMap<GameId, Game>,
}

/// In-memory implementation of the persistence collaborator.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))
    }
}

impl ChampionshipStore for InMemoryStore {
    fn insert_championship(&self, championship: Championship) -> Result<(), StoreError> {
        let mut g = self.write()?;
        g.championships.insert(championship.id, championship);
        Ok(())
    }

    fn championship(&self, id: ChampionshipId) -> Result<Championship, StoreError> {
        self.read()?
            .championships
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("championship"))
    }

    fn set_status(&self, id: ChampionshipId, status: Status) -> Result<(), StoreError> {
        let mut g = self.write()?;
        let c = g
            .championships
            .get_mut(&id)
            .ok_or(StoreError::NotFound("championship"))?;
        c.status = status;
        Ok(())
    }

    fn insert_team(&self, team: Team) -> Result<(), StoreError> {
        let mut g = self.write()?;
        if let Some(championship_id) = team.championship_id {
            let c = g
                .championships
                .get_mut(&championship_id)
                .ok_or(StoreError::NotFound("championship"))?;
            c.team_count += 1;
        }
        g.teams.insert(team.id, team);
        Ok(())
    }

    fn team(&self, id: TeamId) -> Result<Team, StoreError> {
        self.read()?
            .teams
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("team"))
    }

    fn update_team(&self, team: Team) -> Result<(), StoreError> {
        let mut g = self.write()?;
        let old = g
            .teams
            .get(&team.id)
            .cloned()
            .ok_or(StoreError::NotFound("team"))?;
        // Keep team_count in sync when the team changes championship.
        if old.championship_id != team.championship_id {
            if let Some(next) = team.championship_id {
                if !g.championships.contains_key(&next) {
                    return Err(StoreError::NotFound("championship"));
                }
            }
            if let Some(prev) = old.championship_id {
                if let Some(c) = g.championships.get_mut(&prev) {
                    c.team_count = c.team_count.saturating_sub(1);
                }
            }
            if let Some(next) = team.championship_id {
                if let Some(c) = g.championships.get_mut(&next) {
                    c.team_count += 1;
                }
            }
        }
        g.teams.insert(team.id, team);
        Ok(())
    }

    fn teams(&self, championship_id: ChampionshipId) -> Result<Vec<Team>, StoreError> {
        let g = self.read()?;
        let mut teams: Vec<Team> = g
            .teams
            .values()
            .filter(|t| t.championship_id == Some(championship_id))
            .cloned()
            .collect();
        teams.sort_by_key(|t| t.id);
        Ok(teams)
    }

    fn insert_player(&self, player: Player) -> Result<(), StoreError> {
        let mut g = self.write()?;
        if !g.teams.contains_key(&player.team_id) {
            return Err(StoreError::NotFound("team"));
        }
        g.players.insert(player.id, player);
        Ok(())
    }

    fn players(&self, team_id: TeamId) -> Result<Vec<Player>, StoreError> {
        let g = self.read()?;
        let mut players: Vec<Player> = g
            .players
            .values()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect();
        players.sort_by_key(|p| p.id);
        Ok(players)
    }

    fn insert_games(&self, games: Vec<Game>) -> Result<(), StoreError> {
        let mut g = self.write()?;
        for game in games {
            g.games.insert(game.id, game);
        }
        Ok(())
    }

    fn replace_games(
        &self,
        championship_id: ChampionshipId,
        phase: Phase,
        games: Vec<Game>,
    ) -> Result<(), StoreError> {
        let mut g = self.write()?;
        let has_results = g
            .games
            .values()
            .any(|game| game.championship_id == championship_id && game.phase == phase && game.finished);
        if has_results {
            return Err(StoreError::Conflict(format!(
                "The {} already has recorded results; fixtures cannot be regenerated",
                phase.label()
            )));
        }
        g.games
            .retain(|_, game| !(game.championship_id == championship_id && game.phase == phase));
        for game in games {
            g.games.insert(game.id, game);
        }
        Ok(())
    }

    fn game(&self, id: GameId) -> Result<Game, StoreError> {
        self.read()?
            .games
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("game"))
    }

    fn record_result(&self, id: GameId, home_score: u32, away_score: u32) -> Result<Game, StoreError> {
        let mut g = self.write()?;
        let game = g.games.get_mut(&id).ok_or(StoreError::NotFound("game"))?;
        if !game.record_result(home_score, away_score) {
            return Err(StoreError::Conflict(
                "Game is finished; its score is immutable".into(),
            ));
        }
        Ok(game.clone())
    }

    fn games(&self, championship_id: ChampionshipId, phase: Phase) -> Result<Vec<Game>, StoreError> {
        let g = self.read()?;
        let mut games: Vec<Game> = g
            .games
            .values()
            .filter(|game| game.championship_id == championship_id && game.phase == phase)
            .cloned()
            .collect();
        games.sort_by_key(|game| game.id);
        Ok(games)
    }

    fn commit_transition(
        &self,
        id: ChampionshipId,
        from: Phase,
        to: Phase,
        status: Option<Status>,
        new_games: Vec<Game>,
    ) -> Result<(), StoreError> {
        let mut g = self.write()?;
        let c = g
            .championships
            .get_mut(&id)
            .ok_or(StoreError::NotFound("championship"))?;
        if c.current_phase != from {
            return Err(StoreError::Conflict(format!(
                "Phase changed concurrently (expected {}, found {})",
                from.label(),
                c.current_phase.label()
            )));
        }
        c.current_phase = to;
        if let Some(status) = status {
            c.status = status;
        }
        for game in new_games {
            g.games.insert(game.id, game);
        }
        Ok(())
    }
}
