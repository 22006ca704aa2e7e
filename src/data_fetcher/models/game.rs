use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data_fetcher::processors::parse_timestamp;

/// Part of the NFL calendar a game belongs to. Discriminants match ESPN's
/// `seasontype` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeasonType {
    Regular = 2,
    Postseason = 3,
}

impl SeasonType {
    pub const ALL: [SeasonType; 2] = [SeasonType::Regular, SeasonType::Postseason];

    /// Maps ESPN's numeric season type; preseason (1) and anything else is not tracked.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            2 => Some(SeasonType::Regular),
            3 => Some(SeasonType::Postseason),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Final outcome of a game from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}

impl GameResult {
    /// Derives a result by comparing scores.
    pub fn from_scores(team_score: i32, opponent_score: i32) -> Self {
        match team_score.cmp(&opponent_score) {
            std::cmp::Ordering::Greater => GameResult::Win,
            std::cmp::Ordering::Less => GameResult::Loss,
            std::cmp::Ordering::Equal => GameResult::Tie,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameResult::Win => "W",
            GameResult::Loss => "L",
            GameResult::Tie => "T",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled or played game seen from `team_id`'s side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub event_id: String,
    /// ISO-8601 kickoff time as delivered by the source
    pub date: String,
    pub completed: bool,
    pub season: i32,
    pub season_type: SeasonType,
    /// Only present for regular-season games
    pub week: Option<i32>,
    pub week_label: Option<String>,
    pub is_home: bool,
    pub team_id: String,
    pub team_score: Option<i32>,
    pub opponent_id: String,
    pub opponent_name: String,
    pub opponent_score: Option<i32>,
    /// Only present for completed games
    pub result: Option<GameResult>,
}

impl GameRecord {
    /// Parsed kickoff time; `None` when the date string is unusable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }

    pub fn is_regular_season(&self) -> bool {
        self.season_type == SeasonType::Regular
    }
}
