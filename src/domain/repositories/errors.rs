use thiserror::Error;
use uuid::Uuid;

use crate::domain::store::StoreError;

/// Failures surfaced by the league repositories
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Teams not found: {resolved} of {requested} requested teams exist")]
    TeamsNotFound { requested: usize, resolved: usize },

    #[error("Score row references a team that is not playing this match: {0}")]
    InvalidScoreTeam(String),

    #[error("Winner is not one of the teams playing this match: {0}")]
    InvalidWinner(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Player {player_id} was saved but team {team_id} could not be updated: {source}")]
    BackReference {
        player_id: Uuid,
        team_id: Uuid,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    pub fn team_not_found(name: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity: "Team",
            name: name.into(),
        }
    }

    pub fn player_not_found(name: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity: "Player",
            name: name.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
