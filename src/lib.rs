//! Championship manager: data model, phase progression engine, persistence
//! and notification collaborators.

pub mod logic;
pub mod models;
pub mod notify;
pub mod store;

pub use logic::{
    build_bracket, compute_standings, generate_group_games, generate_opening_bracket,
    qualifier_target, select_qualifiers, try_advance, EngineError, PhaseTransition, PointsRule,
};
pub use models::{
    Championship, ChampionshipId, Format, Game, GameId, Phase, Player, PlayerId, Standing, Status,
    Team, TeamId,
};
pub use notify::{
    Audience, Dispatcher, HttpNotifier, LogNotifier, Notification, NotificationError,
    NotificationSender, NotifierConfig,
};
pub use store::{ChampionshipStore, InMemoryStore, StoreError};
