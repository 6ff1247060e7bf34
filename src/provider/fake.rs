use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ProviderError, StatsProvider};
use crate::models::{PlayerInfo, RosterPlayer, SeasonType, StatRow};

/// In-memory provider for handler tests. Counts every call and can be told
/// to fail all of them.
#[derive(Default)]
pub struct FakeStatsProvider {
    calls: AtomicUsize,
    failing: bool,
}

impl FakeStatsProvider {
    pub fn failing() -> Self {
        FakeStatsProvider {
            calls: AtomicUsize::new(0),
            failing: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            Err(ProviderError::Status {
                status: 503,
                body: "stats provider unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn row(value: Value) -> StatRow {
    match value {
        Value::Object(map) => map,
        _ => StatRow::new(),
    }
}

fn season_totals(season_id: &str, gp: i64, pts: i64) -> StatRow {
    row(json!({
        "PLAYER_ID": 2544, "SEASON_ID": season_id, "LEAGUE_ID": "00",
        "TEAM_ID": 1610612747, "TEAM_ABBREVIATION": "LAL", "PLAYER_AGE": 38.0,
        "GP": gp, "GS": gp, "MIN": 35 * gp,
        "FGM": 11 * gp, "FGA": 22 * gp, "FG_PCT": 0.5,
        "FG3M": 2 * gp, "FG3A": 6 * gp, "FG3_PCT": 0.33,
        "FTM": 4 * gp, "FTA": 6 * gp, "FT_PCT": 0.75,
        "OREB": gp, "DREB": 7 * gp, "REB": 8 * gp, "AST": 7 * gp,
        "STL": gp, "BLK": gp, "TOV": 3 * gp, "PF": 2 * gp, "PTS": pts,
    }))
}

#[async_trait]
impl StatsProvider for FakeStatsProvider {
    fn source(&self) -> &str {
        "in-memory"
    }

    async fn player_info(&self, player_id: i64) -> Result<PlayerInfo, ProviderError> {
        self.record()?;
        if player_id != 2544 {
            return Err(ProviderError::PlayerNotFound(player_id));
        }
        Ok(PlayerInfo {
            player_name: "LeBron James".to_string(),
            team: "Los Angeles Lakers".to_string(),
            position: "Forward".to_string(),
        })
    }

    async fn career_totals(
        &self,
        _player_id: i64,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        self.record()?;
        Ok(match season_type {
            SeasonType::RegularSeason => vec![
                season_totals("2021-22", 56, 1695),
                season_totals("2022-23", 55, 1590),
            ],
            SeasonType::Playoffs => vec![season_totals("2022-23", 16, 396)],
        })
    }

    async fn league_player_bios(
        &self,
        season: &str,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        self.record()?;
        Ok(vec![
            row(json!({"PLAYER_ID": 2544, "PLAYER_NAME": "LeBron James",
                       "SEASON": season, "SEASON_TYPE": season_type.as_str(), "PTS": 25.7})),
            row(json!({"PLAYER_ID": 201939, "PLAYER_NAME": "Stephen Curry",
                       "SEASON": season, "SEASON_TYPE": season_type.as_str(), "PTS": 26.4})),
        ])
    }

    async fn last_n_games(
        &self,
        _player_id: i64,
        last_n_games: u32,
        _season: &str,
        _season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        self.record()?;
        Ok(vec![row(json!({
            "GROUP_SET": "Overall", "GROUP_VALUE": "2023-24",
            "GP": last_n_games, "W": 6, "L": 4, "W_PCT": 0.6, "MIN": 35.1,
            "FGM": 10.2, "FGA": 19.0, "FG_PCT": 0.537,
            "FG3M": 2.3, "FG3A": 5.6, "FG3_PCT": 0.41,
            "FTM": 4.1, "FTA": 5.4, "FT_PCT": 0.759,
            "OREB": 0.9, "DREB": 6.4, "REB": 7.3, "AST": 8.1, "TOV": 3.4,
            "STL": 1.2, "BLK": 0.6, "BLKA": 0.7, "PF": 1.1, "PFD": 4.2,
            "PTS": 26.8, "PLUS_MINUS": 3.5, "NBA_FANTASY_PTS": 52.1, "DD2": 4, "TD3": 1,
        }))])
    }

    async fn shot_chart(
        &self,
        player_id: i64,
        _season: &str,
        _season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        self.record()?;
        Ok(vec![
            row(json!({"PLAYER_ID": player_id, "LOC_X": -12, "LOC_Y": 230, "SHOT_MADE_FLAG": 1})),
            row(json!({"PLAYER_ID": player_id, "LOC_X": 3, "LOC_Y": 5, "SHOT_MADE_FLAG": 0})),
        ])
    }

    async fn all_players(&self) -> Result<Vec<RosterPlayer>, ProviderError> {
        self.record()?;
        Ok(vec![RosterPlayer {
            id: 2544,
            full_name: "LeBron James".to_string(),
            first_name: "LeBron".to_string(),
            last_name: "James".to_string(),
            is_active: true,
        }])
    }
}
