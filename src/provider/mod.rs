//! Remote statistics provider.
//!
//! Everything the API serves comes from stats.nba.com. Handlers only see the
//! [`StatsProvider`] trait so they can be driven by an in-memory fake in tests.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::models::{PlayerInfo, RosterPlayer, SeasonType, StatRow};

pub mod nba_stats;

#[cfg(test)]
pub(crate) mod fake;

pub use nba_stats::NbaStatsClient;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request to stats provider failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("stats provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("stats provider response has no '{0}' result set")]
    MissingResultSet(String),
    #[error("malformed stats provider response: {0}")]
    Malformed(String),
    #[error("player {0} not found")]
    PlayerNotFound(i64),
}

#[async_trait]
pub trait StatsProvider: Send + Sync {
    /// Where the statistics come from, e.g. the upstream base URL.
    fn source(&self) -> &str;

    /// Name, team and position of one player.
    async fn player_info(&self, player_id: i64) -> Result<PlayerInfo, ProviderError>;

    /// Season-by-season totals over a player's career.
    async fn career_totals(
        &self,
        player_id: i64,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError>;

    /// Biography and season stats for every player in the league.
    async fn league_player_bios(
        &self,
        season: &str,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError>;

    /// Overall dashboard restricted to a player's most recent games.
    async fn last_n_games(
        &self,
        player_id: i64,
        last_n_games: u32,
        season: &str,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError>;

    /// Every recorded shot attempt, across all teams the player played for.
    async fn shot_chart(
        &self,
        player_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError>;

    /// Every player the league has on record.
    async fn all_players(&self) -> Result<Vec<RosterPlayer>, ProviderError>;
}

/// Top-level body of a stats.nba.com response
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", alias = "resultSet")]
    result_sets: ResultSets,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultSets {
    Many(Vec<ResultSet>),
    One(ResultSet),
}

/// One named table: column headers plus positional rows
#[derive(Debug, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl StatsResponse {
    pub fn result_set(&self, name: &str) -> Result<&ResultSet, ProviderError> {
        let found = match &self.result_sets {
            ResultSets::Many(sets) => sets.iter().find(|set| set.name == name),
            ResultSets::One(set) => Some(set).filter(|set| set.name == name),
        };
        found.ok_or_else(|| ProviderError::MissingResultSet(name.to_string()))
    }

    /// Records of the named result set.
    pub fn records(&self, name: &str) -> Result<Vec<StatRow>, ProviderError> {
        Ok(self.result_set(name)?.records())
    }
}

impl ResultSet {
    /// Zips each row with the headers into a keyed record.
    pub fn records(&self) -> Vec<StatRow> {
        self.row_set
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

/// Reads identity fields from the `CommonPlayerInfo` result set.
pub fn player_info_from(records: &[StatRow], player_id: i64) -> Result<PlayerInfo, ProviderError> {
    let record = records
        .first()
        .ok_or(ProviderError::PlayerNotFound(player_id))?;

    let team = format!("{} {}", text(record, "TEAM_CITY"), text(record, "TEAM_NAME"));

    Ok(PlayerInfo {
        player_name: text(record, "DISPLAY_FIRST_LAST"),
        team: team.trim().to_string(),
        position: text(record, "POSITION"),
    })
}

/// Converts `CommonAllPlayers` records into roster entries.
pub fn roster_from(records: &[StatRow]) -> Result<Vec<RosterPlayer>, ProviderError> {
    records
        .iter()
        .map(|record| {
            let id = record
                .get("PERSON_ID")
                .and_then(Value::as_i64)
                .ok_or_else(|| ProviderError::Malformed("player without PERSON_ID".to_string()))?;

            let full_name = text(record, "DISPLAY_FIRST_LAST");
            let last_comma_first = text(record, "DISPLAY_LAST_COMMA_FIRST");
            let (first_name, last_name) = match last_comma_first.split_once(',') {
                Some((last, first)) => (first.trim().to_string(), last.trim().to_string()),
                None => (last_comma_first.trim().to_string(), String::new()),
            };

            Ok(RosterPlayer {
                id,
                full_name,
                first_name,
                last_name,
                is_active: is_truthy(record.get("ROSTERSTATUS")),
            })
        })
        .collect()
}

fn text(record: &StatRow, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::String(s)) => s == "1" || s.eq_ignore_ascii_case("active"),
        _ => false,
    }
}
