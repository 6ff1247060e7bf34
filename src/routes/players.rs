use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Json,
};
use serde::Deserialize;

use super::AppState;
use crate::error::ApiError;
use crate::models::{PlayerStatsResponse, RosterPlayer, SeasonType, StatRow, DEFAULT_SEASON};
use crate::stats::{self, LAST_N_GAMES_FIELDS};

fn default_season() -> String {
    DEFAULT_SEASON.to_string()
}

fn default_last_n_games() -> u32 {
    10
}

/// Season scoping shared by most player endpoints.
///
/// `season_type` is kept as raw text so an unknown value becomes a
/// validation error with a JSON body instead of an extractor rejection.
#[derive(Deserialize)]
pub struct SeasonQuery {
    #[serde(default = "default_season")]
    season: String,
    #[serde(default)]
    season_type: Option<String>,
}

impl SeasonQuery {
    fn season_type(&self) -> Result<SeasonType, ApiError> {
        parse_season_type(self.season_type.as_deref())
    }
}

// Query parameters for the recent-games dashboard
#[derive(Deserialize)]
pub struct LastNGamesQuery {
    #[serde(default = "default_last_n_games")]
    last_n_games: u32,
    #[serde(default = "default_season")]
    season: String,
    #[serde(default)]
    season_type: Option<String>,
}

fn parse_season_type(raw: Option<&str>) -> Result<SeasonType, ApiError> {
    match raw {
        Some(raw) => Ok(raw.parse::<SeasonType>()?),
        None => Ok(SeasonType::default()),
    }
}

fn invalid_path(rejection: PathRejection) -> ApiError {
    ApiError::ValidationFailure(rejection.body_text())
}

fn invalid_query(rejection: QueryRejection) -> ApiError {
    ApiError::ValidationFailure(rejection.body_text())
}

/// GET /players/:id?season=&season_type= - Career totals, averages and per-game rates
///
/// `season` is only logged: career totals always span every season. `season_type`
/// picks the regular-season or postseason totals table. A player id that is not
/// an integer is reported as not found.
pub async fn get_player_stats(
    State(state): State<AppState>,
    player_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<SeasonQuery>, QueryRejection>,
) -> Result<Json<PlayerStatsResponse>, ApiError> {
    let Path(player_id) = player_id.map_err(|e| ApiError::NotFound(e.body_text()))?;
    let Query(params) = params.map_err(invalid_query)?;
    let season_type = params.season_type()?;
    tracing::debug!("Player {} stats requested for {} {}", player_id, params.season, season_type);

    let (player_info, season_stats) = tokio::try_join!(
        state.provider.player_info(player_id),
        state.provider.career_totals(player_id, season_type),
    )
    .map_err(|e| {
        tracing::error!("Failed to get stats for player {}: {}", player_id, e);
        ApiError::not_found(e)
    })?;

    let response = PlayerStatsResponse::assemble(player_info, season_stats).map_err(|e| {
        tracing::error!("Failed to aggregate stats for player {}: {}", player_id, e);
        ApiError::not_found(e)
    })?;

    Ok(Json(response))
}

// GET /players/season?season=&season_type= - Bio and season stats for every player
pub async fn get_season_players(
    State(state): State<AppState>,
    params: Result<Query<SeasonQuery>, QueryRejection>,
) -> Result<Json<Vec<StatRow>>, ApiError> {
    let Query(params) = params.map_err(invalid_query)?;
    let season_type = params.season_type()?;

    let players = state
        .provider
        .league_player_bios(&params.season, season_type)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get players for {} {}: {}", params.season, season_type, e);
            ApiError::upstream(e)
        })?;

    Ok(Json(players))
}

// GET /players/:id/last_n_games?last_n_games=10 - Dashboard over the most recent games
pub async fn get_last_n_games(
    State(state): State<AppState>,
    player_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<LastNGamesQuery>, QueryRejection>,
) -> Result<Json<Vec<StatRow>>, ApiError> {
    let Path(player_id) = player_id.map_err(invalid_path)?;
    let Query(params) = params.map_err(invalid_query)?;
    let season_type = parse_season_type(params.season_type.as_deref())?;

    let rows = state
        .provider
        .last_n_games(player_id, params.last_n_games, &params.season, season_type)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get last {} games for player {}: {}", params.last_n_games, player_id, e);
            ApiError::upstream(e)
        })?;

    let projected = rows
        .iter()
        .map(|row| stats::project_fields(row, &LAST_N_GAMES_FIELDS))
        .collect();

    Ok(Json(projected))
}

// GET /players/:id/shot_chart?season=&season_type= - Every shot attempt, all teams
pub async fn get_shot_chart(
    State(state): State<AppState>,
    player_id: Result<Path<i64>, PathRejection>,
    params: Result<Query<SeasonQuery>, QueryRejection>,
) -> Result<Json<Vec<StatRow>>, ApiError> {
    let Path(player_id) = player_id.map_err(invalid_path)?;
    let Query(params) = params.map_err(invalid_query)?;
    let season_type = params.season_type()?;

    let shots = state
        .provider
        .shot_chart(player_id, &params.season, season_type)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get shot chart for player {}: {}", player_id, e);
            ApiError::upstream(e)
        })?;

    Ok(Json(shots))
}

// GET /players - Every player on record
pub async fn get_all_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<RosterPlayer>>, ApiError> {
    let players = state.provider.all_players().await.map_err(|e| {
        tracing::error!("Failed to get player list: {}", e);
        ApiError::upstream(e)
    })?;

    Ok(Json(players))
}
