//! End-to-end API integration tests
//!
//! These tests verify the complete HTTP flows including:
//! - Team CRUD addressed by name
//! - Player creation and the team back-reference
//! - Match creation with team name resolution
//! - Status codes for missing and unresolvable records

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cricket_league_api::api;
use cricket_league_api::infrastructure::store::MemoryStore;
use serde_json::{json, Value};
use tower::util::ServiceExt; // for oneshot

/// Setup test application over a fresh in-memory store
fn setup_app() -> Router {
    api::router(Arc::new(MemoryStore::new()))
}

/// Send a request and return status plus decoded JSON body
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

async fn create_team(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, "POST", "/teams", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn tigers_v_lions(winner: &str) -> Value {
    json!({
        "teams": ["Tigers", "Lions"],
        "scores": [
            {"team": "Tigers", "runs": 180, "wicketsLost": 6, "overs": 20},
            {"team": "Lions", "runs": 150, "wicketsLost": 8, "overs": 20}
        ],
        "result": {"winner": winner, "margin": "30 runs"},
        "date": "2024-04-12T14:00:00Z",
        "location": "Wankhede"
    })
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_team_lifecycle() {
    let app = setup_app();

    let (status, created) = send(
        &app,
        "POST",
        "/teams",
        Some(json!({
            "name": "Tigers",
            "coach": "R. Kumar",
            "achievements": "Champions 2023"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_string());
    assert_eq!(created["players"], json!([]));

    let (status, fetched) = send(&app, "GET", "/teams/Tigers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["coach"], "R. Kumar");
    assert_eq!(fetched["achievements"], "Champions 2023");

    let (status, updated) = send(
        &app,
        "PUT",
        "/teams/Tigers",
        Some(json!({"coach": "S. Iyer", "achievements": ["Cup 2023", "Cup 2024"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["coach"], "S. Iyer");
    assert_eq!(updated["achievements"], json!(["Cup 2023", "Cup 2024"]));
    assert_eq!(updated["id"], created["id"]);

    let (status, deleted) = send(&app, "DELETE", "/teams/Tigers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Team deleted");

    let (status, missing) = send(&app, "GET", "/teams/Tigers", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["error"], "Team not found: Tigers");
}

#[tokio::test]
async fn test_duplicate_team_is_conflict() {
    let app = setup_app();
    create_team(&app, "Tigers").await;

    let (status, body) = send(&app, "POST", "/teams", Some(json!({"name": "Tigers"}))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Duplicate key"));
}

#[tokio::test]
async fn test_blank_team_name_is_bad_request() {
    let app = setup_app();

    let (status, _) = send(&app, "POST", "/teams", Some(json!({"name": "   "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_team_update_and_delete_are_not_found() {
    let app = setup_app();

    let (status, _) = send(&app, "PUT", "/teams/Sharks", Some(json!({"coach": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/teams/Sharks", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_player_flow_updates_team() {
    let app = setup_app();
    create_team(&app, "Tigers").await;

    let (status, player) = send(
        &app,
        "POST",
        "/players",
        Some(json!({
            "name": "Ravi",
            "role": "All-Rounder",
            "team": "Tigers",
            "stats": {"matches": 40, "runs": 1200, "strikeRate": 138.2}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(player["role"], "All-Rounder");
    assert_eq!(player["stats"]["strikeRate"], 138.2);

    let (status, team) = send(&app, "GET", "/teams/Tigers", None).await;
    assert_eq!(status, StatusCode::OK);
    let players = team["players"].as_array().unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0]["name"], "Ravi");
    assert_eq!(players[0]["id"], player["id"]);

    let (status, fetched) = send(&app, "GET", "/players/Ravi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["team"]["name"], "Tigers");

    let (status, updated) = send(
        &app,
        "PUT",
        "/players/Ravi",
        Some(json!({"stats": {"runs": 1300}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stats"]["runs"], 1300.0);

    let (status, deleted) = send(&app, "DELETE", "/players/Ravi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Player deleted");

    let (status, _) = send(&app, "GET", "/players/Ravi", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_player_for_unknown_team_is_not_found() {
    let app = setup_app();

    let (status, body) = send(
        &app,
        "POST",
        "/players",
        Some(json!({"name": "Ravi", "role": "Bowler", "team": "Sharks"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Team not found: Sharks");
}

#[tokio::test]
async fn test_player_with_unknown_role_is_rejected() {
    let app = setup_app();
    create_team(&app, "Tigers").await;

    let (status, _) = send(
        &app,
        "POST",
        "/players",
        Some(json!({"name": "Ravi", "role": "Captain", "team": "Tigers"})),
    )
    .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_match_create_and_list() {
    let app = setup_app();
    let tigers = create_team(&app, "Tigers").await;
    let lions = create_team(&app, "Lions").await;

    let (status, created) = send(&app, "POST", "/matches", Some(tigers_v_lions("Tigers"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["teams"], json!([tigers["id"], lions["id"]]));
    assert_eq!(created["scores"][0]["team"], tigers["id"]);
    assert_eq!(created["scores"][1]["wicketsLost"], 8.0);
    assert_eq!(created["result"]["winner"], tigers["id"]);
    assert_eq!(created["location"], "Wankhede");

    let (status, listed) = send(&app, "GET", "/matches", None).await;
    assert_eq!(status, StatusCode::OK);
    let matches = listed.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["teams"][0]["name"], "Tigers");
    assert_eq!(matches[0]["teams"][1]["name"], "Lions");
    assert_eq!(matches[0]["scores"][0]["team"]["name"], "Tigers");
    assert_eq!(matches[0]["scores"][1]["team"]["name"], "Lions");
    assert_eq!(matches[0]["result"]["winner"]["name"], "Tigers");
    assert_eq!(matches[0]["result"]["margin"], "30 runs");
}

#[tokio::test]
async fn test_match_with_unknown_team_is_bad_request() {
    let app = setup_app();
    create_team(&app, "Tigers").await;

    let (status, body) = send(
        &app,
        "POST",
        "/matches",
        Some(json!({
            "teams": ["Tigers", "Sharks"],
            "scores": [],
            "result": {"winner": "Tigers", "margin": "5 runs"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Teams not found"));

    let (_, listed) = send(&app, "GET", "/matches", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_match_with_outside_winner_is_bad_request() {
    let app = setup_app();
    create_team(&app, "Tigers").await;
    create_team(&app, "Lions").await;
    create_team(&app, "Eagles").await;

    let (status, body) = send(&app, "POST", "/matches", Some(tigers_v_lions("Eagles"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Eagles"));
}

#[tokio::test]
async fn test_match_with_repeated_team_is_bad_request() {
    let app = setup_app();
    create_team(&app, "Tigers").await;

    let (status, _) = send(
        &app,
        "POST",
        "/matches",
        Some(json!({
            "teams": ["Tigers", "Tigers"],
            "result": {"winner": "Tigers", "margin": "1 run"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_player_stats_take_any_number() {
    let app = setup_app();
    create_team(&app, "Tigers").await;

    let (status, player) = send(
        &app,
        "POST",
        "/players",
        Some(json!({
            "name": "Ravi",
            "team": "Tigers",
            "stats": {"runs": -5, "matches": 1.5}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(player["stats"]["runs"], -5.0);
    assert_eq!(player["stats"]["matches"], 1.5);
}

#[tokio::test]
async fn test_match_score_takes_fractional_runs() {
    let app = setup_app();
    create_team(&app, "Tigers").await;
    create_team(&app, "Lions").await;

    let (status, created) = send(
        &app,
        "POST",
        "/matches",
        Some(json!({
            "teams": ["Tigers", "Lions"],
            "scores": [{"team": "Tigers", "runs": 180.0, "wicketsLost": 6, "overs": 19.5}],
            "result": {"winner": "Tigers", "margin": "30 runs"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["scores"][0]["runs"], 180.0);
}
