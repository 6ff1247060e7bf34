use serde_json::{Number, Value};

use crate::models::StatRow;

/// Season totals that get divided by games played.
pub const COUNTING_STATS: [&str; 16] = [
    "MIN", "FGM", "FGA", "FG3M", "FG3A", "FTM", "FTA", "OREB", "DREB", "REB", "AST", "STL",
    "BLK", "TOV", "PF", "PTS",
];

/// Rates and attributes copied as-is into the per-game row.
pub const PASSTHROUGH_STATS: [&str; 4] = ["FG_PCT", "FG3_PCT", "FT_PCT", "PLAYER_AGE"];

/// Columns served by the recent-games dashboard.
pub const LAST_N_GAMES_FIELDS: [&str; 26] = [
    "GP", "W", "L", "W_PCT", "MIN", "FGM", "FGA", "FG_PCT", "FG3M", "FG3A", "FG3_PCT", "FTM",
    "FTA", "FT_PCT", "OREB", "DREB", "REB", "AST", "TOV", "STL", "BLK", "BLKA", "PF", "PFD",
    "PTS", "PLUS_MINUS",
];

pub const CAREER_AVERAGES_LABEL: &str = "Career Averages";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    #[error("missing stat '{0}'")]
    MissingStat(&'static str),
    #[error("stat '{0}' is not numeric")]
    NonNumeric(&'static str),
    #[error("player has no season stats")]
    NoSeasons,
}

/// Converts cumulative totals into per-game rates.
///
/// Every counting stat is divided by `GP`, which defaults to 1 when the row
/// has no games-played value. Percentages and age are copied unchanged when
/// present. A `GP` of 0 yields `null` rates.
pub fn per_game_averages(stats: &StatRow) -> Result<StatRow, AggregateError> {
    let games_played = match stats.get("GP") {
        None | Some(Value::Null) => 1.0,
        Some(value) => value.as_f64().ok_or(AggregateError::NonNumeric("GP"))?,
    };

    let mut per_game = StatRow::new();
    for key in COUNTING_STATS {
        let total = stats
            .get(key)
            .ok_or(AggregateError::MissingStat(key))?
            .as_f64()
            .ok_or(AggregateError::NonNumeric(key))?;
        per_game.insert(key.to_string(), number(total / games_played));
    }

    for key in PASSTHROUGH_STATS {
        if let Some(value) = stats.get(key) {
            per_game.insert(key.to_string(), value.clone());
        }
    }

    Ok(per_game)
}

/// Column-wise mean of a player's season rows.
///
/// Only columns whose non-null cells are all numbers are averaged; nulls are
/// skipped. The row is labelled with [`CAREER_AVERAGES_LABEL`] as its
/// `SEASON_ID`.
pub fn career_averages(rows: &[StatRow]) -> Result<StatRow, AggregateError> {
    let first = rows.first().ok_or(AggregateError::NoSeasons)?;

    let mut columns: Vec<&String> = first.keys().collect();
    for row in &rows[1..] {
        for key in row.keys() {
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
    }

    let mut averages = StatRow::new();
    for column in columns {
        if let Some(mean) = column_mean(rows, column) {
            averages.insert(column.clone(), number(mean));
        }
    }
    averages.insert(
        "SEASON_ID".to_string(),
        Value::String(CAREER_AVERAGES_LABEL.to_string()),
    );

    Ok(averages)
}

fn column_mean(rows: &[StatRow], column: &str) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in rows.iter().filter_map(|row| row.get(column)) {
        match value {
            Value::Null => continue,
            Value::Number(n) => {
                sum += n.as_f64()?;
                count += 1;
            }
            _ => return None,
        }
    }
    (count > 0).then(|| sum / count as f64)
}

/// Keeps exactly `fields`, in that order. Columns the row lacks come back as
/// `null`; anything else in the row is dropped.
pub fn project_fields(row: &StatRow, fields: &[&str]) -> StatRow {
    fields
        .iter()
        .map(|field| {
            let value = row.get(*field).cloned().unwrap_or(Value::Null);
            (field.to_string(), value)
        })
        .collect()
}

fn number(value: f64) -> Value {
    Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
}
