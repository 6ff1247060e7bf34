use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::stats::{self, AggregateError};

/// One record of a provider result set, keyed by column header.
pub type StatRow = Map<String, Value>;

/// Season used when a request doesn't name one.
pub const DEFAULT_SEASON: &str = "2024-25";

/// Which part of the season a request is scoped to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SeasonType {
    #[default]
    #[serde(rename = "Regular Season")]
    RegularSeason,
    #[serde(rename = "Playoffs")]
    Playoffs,
}

impl SeasonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::RegularSeason => "Regular Season",
            SeasonType::Playoffs => "Playoffs",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("season_type must be 'Regular Season' or 'Playoffs', got '{0}'")]
pub struct InvalidSeasonType(pub String);

impl FromStr for SeasonType {
    type Err = InvalidSeasonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Regular Season" => Ok(SeasonType::RegularSeason),
            "Playoffs" => Ok(SeasonType::Playoffs),
            other => Err(InvalidSeasonType(other.to_string())),
        }
    }
}

/// Player identity shown above the stat tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerInfo {
    pub player_name: String,
    pub team: String,
    pub position: String,
}

/// Entry of the league-wide player list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: i64,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
}

/// Response body for GET /players/{player_id}
#[derive(Debug, Serialize)]
pub struct PlayerStatsResponse {
    pub player_info: PlayerInfo,
    pub career_averages: StatRow,
    pub per_game_averages: StatRow,
    pub season_stats: Vec<StatRow>,
}

impl PlayerStatsResponse {
    /// Builds the envelope from a player's identity and season total rows.
    pub fn assemble(
        player_info: PlayerInfo,
        season_stats: Vec<StatRow>,
    ) -> Result<Self, AggregateError> {
        let career_averages = stats::career_averages(&season_stats)?;
        let per_game_averages = stats::per_game_averages(&career_averages)?;

        Ok(PlayerStatsResponse {
            player_info,
            career_averages,
            per_game_averages,
            season_stats,
        })
    }
}
