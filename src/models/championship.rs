//! Championship, its phase state machine, and lifecycle status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a championship.
pub type ChampionshipId = Uuid;

/// Phase of a championship. The only legal progression is
/// `Groups -> RoundOf16 -> QuarterFinals -> SemiFinals -> Final -> Closed`;
/// `Closed` is terminal. Serialized names follow the championship API schema.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "grupos")]
    Groups,
    #[serde(rename = "oitavas")]
    RoundOf16,
    #[serde(rename = "quartas")]
    QuarterFinals,
    #[serde(rename = "semifinal")]
    SemiFinals,
    #[serde(rename = "final")]
    Final,
    #[serde(rename = "encerrado")]
    Closed,
}

impl Phase {
    /// Transition function of the phase state machine. `None` only for `Closed`.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Groups => Some(Phase::RoundOf16),
            Phase::RoundOf16 => Some(Phase::QuarterFinals),
            Phase::QuarterFinals => Some(Phase::SemiFinals),
            Phase::SemiFinals => Some(Phase::Final),
            Phase::Final => Some(Phase::Closed),
            Phase::Closed => None,
        }
    }

    /// Whether this phase has no outgoing transition.
    pub fn is_terminal(self) -> bool {
        self == Phase::Closed
    }

    /// Human-readable phase name (pt-BR, used in notification messages).
    pub fn label(self) -> &'static str {
        match self {
            Phase::Groups => "fase de grupos",
            Phase::RoundOf16 => "oitavas de final",
            Phase::QuarterFinals => "quartas de final",
            Phase::SemiFinals => "semifinal",
            Phase::Final => "final",
            Phase::Closed => "encerrado",
        }
    }
}

/// Lifecycle status of a championship. Championships are never deleted,
/// only marked `Inactive`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "ativo")]
    Active,
    #[default]
    #[serde(rename = "agendado")]
    Scheduled,
    #[serde(rename = "finalizado")]
    Finished,
    #[serde(rename = "inativo")]
    Inactive,
}

/// Competition format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Format {
    /// Group stage followed by knockout rounds.
    #[default]
    #[serde(rename = "grupos_e_mata_mata")]
    GroupsKnockout,
    /// Knockout rounds only.
    #[serde(rename = "mata_mata")]
    Knockout,
}

impl Format {
    /// Entry phase for the format: knockout-only championships skip the
    /// group stage and open at the first bracket phase.
    pub fn opening_phase(self) -> Phase {
        match self {
            Format::GroupsKnockout => Phase::Groups,
            Format::Knockout => Phase::RoundOf16,
        }
    }
}

/// A championship: the root entity owning the phase-progression lifecycle.
/// `current_phase` is mutated only by the phase transition controller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Championship {
    pub id: ChampionshipId,
    pub name: String,
    pub format: Format,
    pub current_phase: Phase,
    /// How many teams qualify out of the group stage.
    pub qualified_count: usize,
    pub team_count: usize,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub status: Status,
    /// External identity of the owning administrator.
    pub admin_user_id: String,
}

impl Championship {
    /// Create a scheduled championship in the group phase with no teams yet.
    pub fn new(name: impl Into<String>, qualified_count: usize, admin_user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format: Format::default(),
            current_phase: Phase::Groups,
            qualified_count,
            team_count: 0,
            starts_on: None,
            ends_on: None,
            status: Status::Scheduled,
            admin_user_id: admin_user_id.into(),
        }
    }

    /// Whether the progression engine may still act on this championship.
    pub fn is_open(&self) -> bool {
        !self.current_phase.is_terminal()
            && !matches!(self.status, Status::Finished | Status::Inactive)
    }
}
