//! Request parameters for a flu computation.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::data_fetcher::models::{GameRecord, GameResult};

/// Which subject games anchor the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayMode {
    /// Every completed game
    #[default]
    #[value(name = "all")]
    Any,
    /// Only games the subject won
    #[value(name = "beat")]
    WinOnly,
}

impl PlayMode {
    pub fn admits(self, game: &GameRecord) -> bool {
        match self {
            PlayMode::Any => true,
            PlayMode::WinOnly => game.result == Some(GameResult::Win),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            PlayMode::Any => "All games",
            PlayMode::WinOnly => "Beat opponent only",
        }
    }
}

/// How the opponent's following game is chosen for regular-season games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FollowMode {
    /// The opponent's game in the next calendar week; byes are detected
    #[default]
    #[value(name = "week")]
    NextWeek,
    /// The opponent's next game by kickoff, ignoring byes
    #[value(name = "game")]
    NextPlayedGame,
}

impl FollowMode {
    pub fn describe(self) -> &'static str {
        match self {
            FollowMode::NextWeek => "Next NFL week",
            FollowMode::NextPlayedGame => "Next played game",
        }
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

impl fmt::Display for FollowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Inclusive season range `from..=through`.
///
/// A reversed range is rejected up front: it yields no seasons (so nothing
/// is fetched) rather than an error.
pub fn season_range(from: i32, through: i32) -> Vec<i32> {
    if through < from {
        warn!(
            "Invalid season range: through season {} is before from season {}",
            through, from
        );
        return Vec::new();
    }
    (from..=through).collect()
}

/// One flu computation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluQuery {
    pub subject_team_id: String,
    pub seasons: Vec<i32>,
    pub play_mode: PlayMode,
    pub follow_mode: FollowMode,
}

impl FluQuery {
    pub fn new(
        subject_team_id: impl Into<String>,
        seasons: Vec<i32>,
        play_mode: PlayMode,
        follow_mode: FollowMode,
    ) -> Self {
        Self {
            subject_team_id: subject_team_id.into(),
            seasons,
            play_mode,
            follow_mode,
        }
    }

    /// Builds a query over `from..=through`; see [`season_range`].
    pub fn for_range(
        subject_team_id: impl Into<String>,
        from: i32,
        through: i32,
        play_mode: PlayMode,
        follow_mode: FollowMode,
    ) -> Self {
        Self::new(subject_team_id, season_range(from, through), play_mode, follow_mode)
    }

    /// Same filters, different subject team.
    pub fn with_subject(&self, subject_team_id: impl Into<String>) -> Self {
        Self {
            subject_team_id: subject_team_id.into(),
            ..self.clone()
        }
    }
}
