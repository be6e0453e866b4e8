use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::domain::matches::{Match, MatchDetails, MatchResult, NewMatch, ScoreRow};
use crate::domain::repositories::MatchRepository;
use crate::domain::store::SharedStore;

/// Request body for recording a match; every team is given by name
#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub teams: Vec<String>,
    #[serde(default)]
    pub scores: Vec<ScoreRow<String>>,
    pub result: MatchResult<String>,
    pub date: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

/// Record a match between existing teams
///
/// POST /matches
pub async fn create_match(
    State(store): State<SharedStore>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let new_match = NewMatch::new(req.teams, req.scores, req.result, req.date, req.location)
        .map_err(ApiError::bad_request)?;

    let match_repo = MatchRepository::new(store);
    let stored = match_repo.create(new_match).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// List every match with team details
///
/// GET /matches
pub async fn list_matches(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<MatchDetails>>, ApiError> {
    let match_repo = MatchRepository::new(store);
    let matches = match_repo.list().await?;

    Ok(Json(matches))
}
