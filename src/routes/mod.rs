use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::provider::StatsProvider;

pub mod health;
pub mod players;

/// Shared by every handler. The provider is read-only, so no locking.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn StatsProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn StatsProvider>) -> Self {
        Self { provider }
    }
}

/// Builds the full API with CORS restricted to `cors_origins`.
pub fn router(state: AppState, cors_origins: Vec<HeaderValue>) -> Router {
    // Credentialed CORS can't use wildcards, so methods and headers are
    // mirrored from the preflight instead.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cors_origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        // Root and health
        .route("/", get(|| async { "NBA Stats Proxy API - v1.0" }))
        .route("/health", get(health::health_check))

        // Player endpoints
        .route("/players", get(players::get_all_players))
        .route("/players/season", get(players::get_season_players))
        .route("/players/{player_id}", get(players::get_player_stats))
        .route("/players/{player_id}/last_n_games", get(players::get_last_n_games))
        .route("/players/{player_id}/shot_chart", get(players::get_shot_chart))

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
