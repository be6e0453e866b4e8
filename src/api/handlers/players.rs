use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::MessageResponse;
use crate::api::errors::ApiError;
use crate::domain::player::{Player, PlayerPatch, PlayerRole, PlayerStats, PlayerWithTeam};
use crate::domain::repositories::PlayerRepository;
use crate::domain::store::SharedStore;

/// Request body for creating a player; `team` is the team's name
#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub role: Option<PlayerRole>,
    pub team: String,
    pub stats: Option<PlayerStats>,
}

/// Create a player and list them on their team
///
/// POST /players
pub async fn create_player(
    State(store): State<SharedStore>,
    Json(req): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let player_repo = PlayerRepository::new(store);
    let player = player_repo
        .create(req.name, req.role, &req.team, req.stats)
        .await?;

    Ok((StatusCode::CREATED, Json(player)))
}

/// Get a player by name, with their team
///
/// GET /players/:name
pub async fn get_player(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
) -> Result<Json<PlayerWithTeam>, ApiError> {
    let player_repo = PlayerRepository::new(store);
    let player = player_repo.get_by_name(&name).await?;

    Ok(Json(player))
}

/// Update a player; a `team` in the body is a team name
///
/// PUT /players/:name
pub async fn update_player(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
    Json(patch): Json<PlayerPatch>,
) -> Result<Json<Player>, ApiError> {
    let player_repo = PlayerRepository::new(store);
    let player = player_repo.update_by_name(&name, patch).await?;

    Ok(Json(player))
}

/// Delete a player
///
/// DELETE /players/:name
pub async fn delete_player(
    State(store): State<SharedStore>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let player_repo = PlayerRepository::new(store);
    player_repo.delete_by_name(&name).await?;

    Ok(Json(MessageResponse::new("Player deleted")))
}
