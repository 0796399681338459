use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pigeon number reserved for the synthetic consensus row. Real pigeons are numbered from 1.
pub const CONSENSUS_PIGEON_NUMBER: u32 = 0;
pub const CONSENSUS_NAME: &str = "Consensus";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "scheduled",
            GameStatus::InProgress => "in_progress",
            GameStatus::Final => "final",
        }
    }

    /// Scores are only meaningful once a game has kicked off.
    pub fn has_started(&self) -> bool {
        matches!(self, GameStatus::InProgress | GameStatus::Final)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(GameStatus::Scheduled),
            "in_progress" => Ok(GameStatus::InProgress),
            "final" => Ok(GameStatus::Final),
            other => Err(format!("unknown game status '{}'", other)),
        }
    }
}

/// Actual signed margin (home minus away) when the game has started and both scores are known.
pub fn actual_margin(status: GameStatus, home_score: Option<i32>, away_score: Option<i32>) -> Option<i32> {
    if !status.has_started() {
        return None;
    }
    match (home_score, away_score) {
        (Some(home), Some(away)) => Some(home - away),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pigeon {
    pub pigeon_number: u32,
    pub pigeon_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: u32,
    pub week_number: u32,
    pub kickoff_at: DateTime<Utc>,
    pub home_abbr: String,
    pub away_abbr: String,
    pub status: GameStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl Game {
    pub fn actual_margin(&self) -> Option<i32> {
        actual_margin(self.status, self.home_score, self.away_score)
    }
}

/// One pigeon's pick for one game, joined with the game it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPick {
    pub pigeon_number: u32,
    pub pigeon_name: String,
    pub game_id: u32,
    pub week_number: u32,
    pub picked_home: bool,
    pub predicted_margin: u32,
    pub home_abbr: String,
    pub away_abbr: String,
    pub kickoff_at: DateTime<Utc>,
    pub status: GameStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl WeekPick {
    /// Positive when the home side was picked, negative for the away side.
    /// Margins past `i32::MAX` saturate so the side is never flipped.
    pub fn signed_margin(&self) -> i32 {
        let margin = i32::try_from(self.predicted_margin).unwrap_or(i32::MAX);
        if self.picked_home {
            margin
        } else {
            -margin
        }
    }

    pub fn actual_margin(&self) -> Option<i32> {
        actual_margin(self.status, self.home_score, self.away_score)
    }

    pub fn picked_abbr(&self) -> &str {
        if self.picked_home {
            &self.home_abbr
        } else {
            &self.away_abbr
        }
    }
}

/// Raw pick submission, as imported from CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickInput {
    pub pigeon_number: u32,
    pub game_id: u32,
    pub picked_home: bool,
    pub predicted_margin: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub pigeon_number: u32,
    pub pigeon_name: String,
    pub week_number: u32,
    pub rank: u32,
    /// Cumulative pick error for the week, lower is better
    pub score: i64,
    /// Position points used by the YTD standings, lower is better
    pub points: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleSignal {
    pub live_week: Option<u32>,
    pub next_picks_week: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekState {
    NotStarted,
    InProgress,
    Completed,
}

impl WeekState {
    pub fn label(&self) -> &'static str {
        match self {
            WeekState::NotStarted => "not started",
            WeekState::InProgress => "in progress",
            WeekState::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStatus {
    pub week_number: u32,
    pub state: WeekState,
    /// Set when the schedule signal carried neither a live week nor a next picks week
    /// and `state` is a fallback rather than a real determination.
    pub defaulted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMeta {
    pub game_id: u32,
    pub home_abbr: String,
    pub away_abbr: String,
    pub kickoff_at: DateTime<Utc>,
    pub status: GameStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickCell {
    /// Signed margin; for the consensus row this is the mean across pigeons
    pub signed: f64,
    pub label: String,
    pub home_abbr: String,
    pub away_abbr: String,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsRow {
    pub pigeon_number: u32,
    pub pigeon_name: String,
    /// Keyed by game id
    pub picks: BTreeMap<u32, PickCell>,
    pub points: Option<f64>,
    pub rank: Option<u32>,
    pub score: Option<i64>,
}

impl ResultsRow {
    pub fn is_consensus(&self) -> bool {
        self.pigeon_number == CONSENSUS_PIGEON_NUMBER
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekBoard {
    pub week_number: Option<u32>,
    pub rows: Vec<ResultsRow>,
    pub games: Vec<GameMeta>,
    pub consensus: Option<ResultsRow>,
    pub state: Option<WeekStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YtdWeek {
    pub rank: u32,
    pub score: i64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YtdRow {
    pub pigeon_number: u32,
    pub pigeon_name: String,
    /// Keyed by week number, ascending
    pub by_week: BTreeMap<u32, YtdWeek>,
    pub points_total: f64,
    pub points_worst: f64,
    pub points_adj: f64,
    pub top5: u32,
    pub return_total: f64,
    pub year_rank_pts: u32,
    pub year_rank_ret: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekLock {
    pub week_number: u32,
    pub lock_at: DateTime<Utc>,
    pub is_locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentWeek {
    pub week: u32,
    pub status: GameStatus,
}

// API Response types
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_status_parse() {
        assert_eq!("final".parse::<GameStatus>(), Ok(GameStatus::Final));
        assert_eq!(" In_Progress ".parse::<GameStatus>(), Ok(GameStatus::InProgress));
        assert!("postponed".parse::<GameStatus>().is_err());
        assert_eq!(GameStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_actual_margin_requires_started_game() {
        assert_eq!(actual_margin(GameStatus::Final, Some(24), Some(17)), Some(7));
        assert_eq!(actual_margin(GameStatus::InProgress, Some(3), Some(10)), Some(-7));
        assert_eq!(actual_margin(GameStatus::Scheduled, Some(0), Some(0)), None);
        assert_eq!(actual_margin(GameStatus::Final, Some(21), None), None);
    }

    #[test]
    fn test_week_state_serializes_snake_case() {
        let json = serde_json::to_string(&WeekState::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");
        assert_eq!(WeekState::InProgress.label(), "in progress");
    }
}
