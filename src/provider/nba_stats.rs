use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

use super::{player_info_from, roster_from, ProviderError, StatsProvider, StatsResponse};
use crate::models::{PlayerInfo, RosterPlayer, SeasonType, StatRow, DEFAULT_SEASON};

const LEAGUE_ID: &str = "00";

/// stats.nba.com client.
///
/// The provider rejects requests that don't look like they come from the
/// nba.com site, so every call carries browser-like headers.
#[derive(Clone)]
pub struct NbaStatsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NbaStatsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(header::REFERER, HeaderValue::from_static("https://www.nba.com/"));
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://www.nba.com"));
        headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
        headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(NbaStatsClient {
            http,
            base_url: base_url.into(),
        })
    }

    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<StatsResponse, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let before = Instant::now();

        let response = self.http.get(&url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("[stats.nba.com] {} returned {}", endpoint, status);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<StatsResponse>()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        tracing::debug!("[stats.nba.com] {} {:.2?}", endpoint, before.elapsed());
        Ok(parsed)
    }
}

fn empty<'a>(keys: &'a [&'static str]) -> impl Iterator<Item = (&'static str, String)> + 'a {
    keys.iter().map(|key| (*key, String::new()))
}

#[async_trait]
impl StatsProvider for NbaStatsClient {
    fn source(&self) -> &str {
        &self.base_url
    }

    async fn player_info(&self, player_id: i64) -> Result<PlayerInfo, ProviderError> {
        let params = [
            ("PlayerID", player_id.to_string()),
            ("LeagueID", String::new()),
        ];
        let response = self.fetch("commonplayerinfo", &params).await?;
        player_info_from(&response.records("CommonPlayerInfo")?, player_id)
    }

    async fn career_totals(
        &self,
        player_id: i64,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        let params = [
            ("PlayerID", player_id.to_string()),
            ("PerMode", "Totals".to_string()),
            ("LeagueID", String::new()),
        ];
        let response = self.fetch("playercareerstats", &params).await?;

        let result_set = match season_type {
            SeasonType::RegularSeason => "SeasonTotalsRegularSeason",
            SeasonType::Playoffs => "SeasonTotalsPostSeason",
        };
        response.records(result_set)
    }

    async fn league_player_bios(
        &self,
        season: &str,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        let mut params = vec![
            ("LeagueID", LEAGUE_ID.to_string()),
            ("PerMode", "PerGame".to_string()),
            ("Season", season.to_string()),
            ("SeasonType", season_type.to_string()),
            ("LastNGames", "0".to_string()),
            ("Month", "0".to_string()),
            ("OpponentTeamID", "0".to_string()),
            ("Period", "0".to_string()),
        ];
        params.extend(empty(&[
            "College", "Conference", "Country", "DateFrom", "DateTo", "Division",
            "DraftPick", "DraftYear", "GameScope", "GameSegment", "Height", "Location",
            "Outcome", "PORound", "PlayerExperience", "PlayerPosition", "SeasonSegment",
            "ShotClockRange", "StarterBench", "TeamID", "VsConference", "VsDivision", "Weight",
        ]));

        let response = self.fetch("leaguedashplayerbiostats", &params).await?;
        response.records("LeagueDashPlayerBioStats")
    }

    async fn last_n_games(
        &self,
        player_id: i64,
        last_n_games: u32,
        season: &str,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        let mut params = vec![
            ("PlayerID", player_id.to_string()),
            ("LastNGames", last_n_games.to_string()),
            ("Season", season.to_string()),
            ("SeasonType", season_type.to_string()),
            ("MeasureType", "Base".to_string()),
            ("PerMode", "PerGame".to_string()),
            ("PaceAdjust", "N".to_string()),
            ("PlusMinus", "N".to_string()),
            ("Rank", "N".to_string()),
            ("Month", "0".to_string()),
            ("OpponentTeamID", "0".to_string()),
            ("Period", "0".to_string()),
            ("PORound", "0".to_string()),
        ];
        params.extend(empty(&[
            "DateFrom", "DateTo", "GameSegment", "LeagueID", "Location", "Outcome",
            "SeasonSegment", "ShotClockRange", "VsConference", "VsDivision",
        ]));

        let response = self.fetch("playerdashboardbylastngames", &params).await?;
        response.records("OverallPlayerDashboard")
    }

    async fn shot_chart(
        &self,
        player_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<Vec<StatRow>, ProviderError> {
        let mut params = vec![
            ("PlayerID", player_id.to_string()),
            // 0 disables the team filter
            ("TeamID", "0".to_string()),
            ("Season", season.to_string()),
            ("SeasonType", season_type.to_string()),
            ("ContextMeasure", "FGA".to_string()),
            ("LeagueID", LEAGUE_ID.to_string()),
            ("LastNGames", "0".to_string()),
            ("Month", "0".to_string()),
            ("OpponentTeamID", "0".to_string()),
            ("Period", "0".to_string()),
        ];
        params.extend(empty(&[
            "AheadBehind", "ClutchTime", "ContextFilter", "DateFrom", "DateTo", "EndPeriod",
            "EndRange", "GameID", "GameSegment", "Location", "Outcome", "PlayerPosition",
            "PointDiff", "Position", "RangeType", "RookieYear", "SeasonSegment",
            "StartPeriod", "StartRange", "VsConference", "VsDivision",
        ]));

        let response = self.fetch("shotchartdetail", &params).await?;
        response.records("Shot_Chart_Detail")
    }

    async fn all_players(&self) -> Result<Vec<RosterPlayer>, ProviderError> {
        let params = [
            ("LeagueID", LEAGUE_ID.to_string()),
            ("Season", DEFAULT_SEASON.to_string()),
            ("IsOnlyCurrentSeason", "0".to_string()),
        ];
        let response = self.fetch("commonallplayers", &params).await?;
        roster_from(&response.records("CommonAllPlayers")?)
    }
}
