//! Data structures for the championship manager: championships, teams,
//! players, games, and derived standings.

mod championship;
mod game;
mod standing;
mod team;

pub use championship::{Championship, ChampionshipId, Format, Phase, Status};
pub use game::{Game, GameId};
pub use standing::Standing;
pub use team::{Player, PlayerId, Team, TeamId};
