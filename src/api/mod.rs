// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::domain::store::SharedStore;
use handlers::{health, matches, players, teams};

/// Build the league router over a shared store
pub fn router(store: SharedStore) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Team routes
        .route("/teams", post(teams::create_team))
        .route(
            "/teams/:name",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        // Player routes
        .route("/players", post(players::create_player))
        .route(
            "/players/:name",
            get(players::get_player)
                .put(players::update_player)
                .delete(players::delete_player),
        )
        // Match routes
        .route(
            "/matches",
            post(matches::create_match).get(matches::list_matches),
        )
        .with_state(store)
}
