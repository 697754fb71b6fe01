//! Persistence collaborator: a narrow record-store interface plus the
//! in-memory implementation backing the web binary and the tests.

mod memory;

pub use memory::InMemoryStore;

use crate::models::{
    Championship, ChampionshipId, Game, GameId, Phase, Player, Status, Team, TeamId,
};

/// Errors from the persistence collaborator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// The named record does not exist.
    NotFound(&'static str),
    /// A concurrent writer got there first (or the record is immutable).
    Conflict(String),
    /// Backend failure (connection, lock poisoning, ...).
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(kind) => write!(f, "No such {}", kind),
            StoreError::Conflict(msg) => write!(f, "{}", msg),
            StoreError::Backend(msg) => write!(f, "Storage backend failure: {}", msg),
        }
    }
}

/// Record store for championships, teams, players, and games.
///
/// The engine treats this as a transactional key-value store keyed by record
/// id. `commit_transition` is the single all-or-nothing write the transition
/// controller uses: it must verify the stored phase still matches `from`
/// (compare-and-swap) and apply the phase, status, and new games atomically.
pub trait ChampionshipStore: Send + Sync {
    fn insert_championship(&self, championship: Championship) -> Result<(), StoreError>;
    fn championship(&self, id: ChampionshipId) -> Result<Championship, StoreError>;
    /// Soft delete / lifecycle change; championships are never removed.
    fn set_status(&self, id: ChampionshipId, status: Status) -> Result<(), StoreError>;

    /// Insert a team. When the team is registered to a championship, the
    /// championship must exist and its team count is kept in sync.
    fn insert_team(&self, team: Team) -> Result<(), StoreError>;
    fn team(&self, id: TeamId) -> Result<Team, StoreError>;
    fn update_team(&self, team: Team) -> Result<(), StoreError>;
    fn teams(&self, championship_id: ChampionshipId) -> Result<Vec<Team>, StoreError>;

    fn insert_player(&self, player: Player) -> Result<(), StoreError>;
    fn players(&self, team_id: TeamId) -> Result<Vec<Player>, StoreError>;

    fn insert_games(&self, games: Vec<Game>) -> Result<(), StoreError>;
    /// Replace a phase's fixture list (regeneration). Fails with `Conflict`
    /// if any existing game of the phase is finished - recorded results are
    /// never discarded.
    fn replace_games(
        &self,
        championship_id: ChampionshipId,
        phase: Phase,
        games: Vec<Game>,
    ) -> Result<(), StoreError>;
    fn game(&self, id: GameId) -> Result<Game, StoreError>;
    /// Record a final score. Fails with `Conflict` if the game is already
    /// finished (completed scores are immutable).
    fn record_result(&self, id: GameId, home_score: u32, away_score: u32) -> Result<Game, StoreError>;
    fn games(&self, championship_id: ChampionshipId, phase: Phase) -> Result<Vec<Game>, StoreError>;

    /// Atomically advance a championship: verify `current_phase == from`
    /// (fail with `Conflict` otherwise), set it to `to`, optionally update the
    /// status, and insert the new phase's games. All or nothing.
    fn commit_transition(
        &self,
        id: ChampionshipId,
        from: Phase,
        to: Phase,
        status: Option<Status>,
        new_games: Vec<Game>,
    ) -> Result<(), StoreError>;
}
