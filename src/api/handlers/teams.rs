use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::MessageResponse;
use crate::api::errors::ApiError;
use crate::domain::repositories::TeamRepository;
use crate::domain::store::SharedStore;
use crate::domain::team::{Achievements, NewTeam, Team, TeamPatch, TeamWithPlayers};

/// Request body for creating a team
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub coach: Option<String>,
    pub achievements: Option<Achievements>,
}

/// Create a new team
///
/// POST /teams
pub async fn create_team(
    State(store): State<SharedStore>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let team = NewTeam::new(req.name, req.coach, req.achievements).map_err(ApiError::bad_request)?;

    let team_repo = TeamRepository::new(store);
    let team = team_repo.create(team).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Get a team by name, with its players
///
/// GET /teams/:name
pub async fn get_team(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
) -> Result<Json<TeamWithPlayers>, ApiError> {
    let team_repo = TeamRepository::new(store);
    let team = team_repo.get_by_name(&name).await?;

    Ok(Json(team))
}

/// Update a team's details
///
/// PUT /teams/:name
pub async fn update_team(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Json(patch): Json<TeamPatch>,
) -> Result<Json<Team>, ApiError> {
    let team_repo = TeamRepository::new(store);
    let team = team_repo.update_by_name(&name, patch).await?;

    Ok(Json(team))
}

/// Delete a team
///
/// DELETE /teams/:name
pub async fn delete_team(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let team_repo = TeamRepository::new(store);
    team_repo.delete_by_name(&name).await?;

    Ok(Json(MessageResponse::new("Team deleted")))
}
