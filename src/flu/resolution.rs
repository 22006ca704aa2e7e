//! Opponent follow-up game resolution.
//!
//! Which of the opponent's games counts as "the next one" depends on the
//! subject game's season type, the subject's result and the follow mode.
//! [`select_strategy`] is the decision table; [`resolve_in_season`] and
//! [`pick_season_opener`] are pure pickers over already-fetched schedules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::query::FollowMode;
use crate::data_fetcher::models::{GameRecord, GameResult, SeasonType};

/// How the opponent's follow-up game is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowUpStrategy {
    /// Playoff loss for the subject: the opponent advanced, take its next
    /// postseason game of the same season.
    NextPostseasonGame,
    /// Playoff win (or tie) for the subject: the opponent is out, take its
    /// first regular-season game of the following season.
    NextSeasonOpener,
    /// Regular season by kickoff: the opponent's next game of any type,
    /// else its first game of the following season.
    NextPlayedGame,
    /// Regular season by week slot: the opponent's game in week + 1; a
    /// later game without one is a bye; no later game at all falls through
    /// to the following season's first regular-season game.
    NextWeekSlot,
}

/// The decision table.
pub fn select_strategy(
    season_type: SeasonType,
    subject_result: Option<GameResult>,
    follow_mode: FollowMode,
) -> FollowUpStrategy {
    match (season_type, subject_result, follow_mode) {
        (SeasonType::Postseason, Some(GameResult::Loss), _) => FollowUpStrategy::NextPostseasonGame,
        (SeasonType::Postseason, _, _) => FollowUpStrategy::NextSeasonOpener,
        (SeasonType::Regular, _, FollowMode::NextPlayedGame) => FollowUpStrategy::NextPlayedGame,
        (SeasonType::Regular, _, FollowMode::NextWeek) => FollowUpStrategy::NextWeekSlot,
    }
}

/// Which of the following season's games opens it for the opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonOpener {
    /// First regular-season game
    Regular,
    /// First game of any type
    Any,
}

/// Result of looking at the opponent's current-season schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InSeasonOutcome<'a> {
    Found(&'a GameRecord),
    /// The opponent sat out the next week but plays again later
    Bye,
    /// The opponent's season is over; look at the following season
    NextSeason(SeasonOpener),
    /// Nothing can be determined (e.g. the subject game has no usable date)
    Unresolved,
}

/// Resolves the follow-up within the subject game's own season.
///
/// `opponent_games` is the opponent's schedule for `subject.season`.
pub fn resolve_in_season<'a>(
    strategy: FollowUpStrategy,
    subject: &GameRecord,
    opponent_games: &'a [GameRecord],
) -> InSeasonOutcome<'a> {
    let season = subject.season;
    let kickoff = subject.timestamp();

    match strategy {
        FollowUpStrategy::NextSeasonOpener => InSeasonOutcome::NextSeason(SeasonOpener::Regular),
        FollowUpStrategy::NextPostseasonGame => match kickoff {
            Some(after) => next_game_after(opponent_games, after, season, Some(SeasonType::Postseason))
                .map_or(InSeasonOutcome::Unresolved, InSeasonOutcome::Found),
            // Undated subject game: no reference point, not the epoch
            None => InSeasonOutcome::Unresolved,
        },
        FollowUpStrategy::NextPlayedGame => match kickoff {
            Some(after) => match next_game_after(opponent_games, after, season, None) {
                Some(game) => InSeasonOutcome::Found(game),
                None => InSeasonOutcome::NextSeason(SeasonOpener::Any),
            },
            // Undated subject game: no reference point, not the epoch
            None => InSeasonOutcome::Unresolved,
        },
        FollowUpStrategy::NextWeekSlot => {
            if let Some(game) = subject
                .week
                .and_then(|week| week_slot_game(opponent_games, season, week + 1))
            {
                return InSeasonOutcome::Found(game);
            }
            match kickoff {
                Some(after) if next_game_after(opponent_games, after, season, None).is_some() => {
                    InSeasonOutcome::Bye
                }
                Some(_) => InSeasonOutcome::NextSeason(SeasonOpener::Regular),
                // Undated subject game: no reference point, not the epoch
                None => InSeasonOutcome::Unresolved,
            }
        }
    }
}

/// Picks the opponent's opener from its `season` schedule.
pub fn pick_season_opener(
    opener: SeasonOpener,
    opponent_games: &[GameRecord],
    season: i32,
) -> Option<&GameRecord> {
    let season_type = match opener {
        SeasonOpener::Regular => Some(SeasonType::Regular),
        SeasonOpener::Any => None,
    };
    earliest_game(opponent_games, season, season_type)
}

/// Regular-season game played in `week` of `season`.
pub fn week_slot_game(games: &[GameRecord], season: i32, week: i32) -> Option<&GameRecord> {
    games
        .iter()
        .find(|g| g.season == season && g.is_regular_season() && g.week == Some(week))
}

/// Earliest game of `season` (optionally of one season type) kicking off
/// strictly after `after`.
pub fn next_game_after(
    games: &[GameRecord],
    after: DateTime<Utc>,
    season: i32,
    season_type: Option<SeasonType>,
) -> Option<&GameRecord> {
    earliest(
        games
            .iter()
            .filter(|g| matches_filters(g, season, season_type)),
        |ts| ts > after,
    )
}

/// Earliest game of `season`, optionally of one season type.
pub fn earliest_game(
    games: &[GameRecord],
    season: i32,
    season_type: Option<SeasonType>,
) -> Option<&GameRecord> {
    earliest(
        games
            .iter()
            .filter(|g| matches_filters(g, season, season_type)),
        |_| true,
    )
}

fn matches_filters(game: &GameRecord, season: i32, season_type: Option<SeasonType>) -> bool {
    game.season == season && season_type.is_none_or(|t| game.season_type == t)
}

// Games without a parsable kickoff never qualify. Strict comparison keeps
// the first of equal kickoffs.
fn earliest<'a>(
    games: impl Iterator<Item = &'a GameRecord>,
    accept: impl Fn(DateTime<Utc>) -> bool,
) -> Option<&'a GameRecord> {
    let mut best: Option<(DateTime<Utc>, &'a GameRecord)> = None;
    for game in games {
        let Some(ts) = game.timestamp() else {
            continue;
        };
        if !accept(ts) {
            continue;
        }
        if best.is_none_or(|(best_ts, _)| ts < best_ts) {
            best = Some((ts, game));
        }
    }
    best.map(|(_, game)| game)
}
