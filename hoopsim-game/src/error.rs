//! Request validation failures surfaced before any simulation work starts.
use thiserror::Error;

use crate::attributes::AttributeKey;
use crate::config::ConfigError;
use crate::position::Position;

/// Rejection reasons for a simulation request. Every variant is raised
/// before computation begins; nothing here is a mid-run fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no player picked for the {0} attribute")]
    MissingAttribute(AttributeKey),
    #[error("{0} was picked but is not available in this dataset")]
    UnavailableAttribute(AttributeKey),
    #[error("choose a team before starting the simulation")]
    MissingTeam,
    #[error("the league pool for this era is empty")]
    EmptyLeaguePool,
    #[error("the team pool for this era is empty")]
    EmptyTeamPool,
    #[error("at least 2 entrants are required (got {0})")]
    TooFewEntrants(usize),
    #[error("every drafted team needs a name")]
    MissingTeamName,
    #[error("team {team} has no player in the {slot} slot")]
    MissingSlot { team: String, slot: Position },
    #[error("team {team} lists the {slot} slot more than once")]
    DuplicateSlot { team: String, slot: Position },
    #[error("team {team} lists {count} players; a lineup needs exactly five")]
    LineupSize { team: String, count: usize },
    #[error("no player named `{0}` in the roster")]
    UnknownPlayer(String),
    #[error("entrant name `{0}` is used more than once")]
    DuplicateEntrant(String),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
