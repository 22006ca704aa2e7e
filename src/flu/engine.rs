//! The flu computation: subject games linked to their opponents' follow-ups.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

use super::query::FluQuery;
use super::resolution::{InSeasonOutcome, pick_season_opener, resolve_in_season, select_strategy};
use crate::constants::DEFAULT_MAX_CONCURRENT_FETCHES;
use crate::data_fetcher::models::{GameRecord, GameResult, SeasonType};
use crate::data_fetcher::provider::ScheduleProvider;
use crate::error::AppError;

/// One subject game and what its opponent did next.
///
/// `next_*` fields describe the opponent's follow-up game from the
/// opponent's own perspective; they are all `None` when no follow-up was
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedGameRow {
    pub season: i32,
    pub season_type: SeasonType,
    pub week: Option<i32>,
    pub week_label: Option<String>,
    pub date: String,
    pub is_home: bool,
    pub opponent_id: String,
    pub opponent_name: String,
    pub result: Option<GameResult>,
    pub team_score: Option<i32>,
    pub opponent_score: Option<i32>,

    pub next_date: Option<String>,
    pub next_season: Option<i32>,
    pub next_week: Option<i32>,
    pub next_week_label: Option<String>,
    pub next_result: Option<GameResult>,
    pub next_opponent_name: Option<String>,
    /// Whether the opponent hosted its follow-up game
    pub next_opponent_is_home: Option<bool>,
    pub next_team_score: Option<i32>,
    pub next_opponent_score: Option<i32>,

    pub after_bye: bool,
    pub cross_season: bool,
}

impl LinkedGameRow {
    /// Links a subject game to the opponent's follow-up (if any).
    pub fn link(subject: &GameRecord, next: Option<&GameRecord>, after_bye: bool) -> Self {
        Self {
            season: subject.season,
            season_type: subject.season_type,
            week: subject.week,
            week_label: subject.week_label.clone(),
            date: subject.date.clone(),
            is_home: subject.is_home,
            opponent_id: subject.opponent_id.clone(),
            opponent_name: subject.opponent_name.clone(),
            result: subject.result,
            team_score: subject.team_score,
            opponent_score: subject.opponent_score,

            next_date: next.map(|n| n.date.clone()),
            next_season: next.map(|n| n.season),
            next_week: next.and_then(|n| n.week),
            next_week_label: next.and_then(|n| n.week_label.clone()),
            next_result: next.and_then(|n| n.result),
            next_opponent_name: next.map(|n| n.opponent_name.clone()),
            next_opponent_is_home: next.map(|n| n.is_home),
            next_team_score: next.and_then(|n| n.team_score),
            next_opponent_score: next.and_then(|n| n.opponent_score),

            after_bye: after_bye && next.is_none(),
            cross_season: next.is_some_and(|n| n.season == subject.season + 1),
        }
    }

    /// `Some(true)` when the opponent lost its follow-up game, `None` when
    /// there is no follow-up result to judge.
    pub fn flu(&self) -> Option<bool> {
        self.next_result.map(|r| r == GameResult::Loss)
    }

    pub fn has_follow_up(&self) -> bool {
        self.next_date.is_some()
    }
}

type ScheduleKey = (String, i32);

/// `None` marks a fetch that failed.
type ScheduleMemo = HashMap<ScheduleKey, Option<Vec<GameRecord>>>;

/// Computes [`LinkedGameRow`]s against a [`ScheduleProvider`].
///
/// Opponent schedules for a season are prefetched concurrently; following
/// seasons are fetched only for opponents whose season ended. Each call
/// keeps its own schedule memo, so results depend only on the query and
/// what the provider returns.
pub struct FluEngine<'a, P> {
    provider: &'a P,
    max_concurrent_fetches: usize,
}

impl<'a, P: ScheduleProvider> FluEngine<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    pub fn with_concurrency(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches.max(1);
        self
    }

    /// Rows for every season in the query, season-major, each season in the
    /// provider's order.
    ///
    /// # Errors
    ///
    /// Fails only when the subject team's own schedule cannot be fetched:
    /// [`AppError::InvalidTeamId`] for a malformed id, otherwise
    /// [`AppError::DataUnavailable`]. Opponent failures degrade to rows
    /// without a follow-up.
    #[instrument(skip(self, query), fields(team = %query.subject_team_id, seasons = ?query.seasons))]
    pub async fn compute(&self, query: &FluQuery) -> Result<Vec<LinkedGameRow>, AppError> {
        let mut rows = Vec::new();
        for &season in &query.seasons {
            rows.extend(self.compute_season(query, season).await?);
        }
        info!(
            "Computed {} rows for team {} ({} seasons, {:?}, {:?})",
            rows.len(),
            query.subject_team_id,
            query.seasons.len(),
            query.play_mode,
            query.follow_mode
        );
        Ok(rows)
    }

    async fn compute_season(&self, query: &FluQuery, season: i32) -> Result<Vec<LinkedGameRow>, AppError> {
        let subject_games = self.subject_schedule(&query.subject_team_id, season).await?;
        let qualifying: Vec<&GameRecord> = subject_games
            .iter()
            .filter(|g| g.completed && query.play_mode.admits(g))
            .collect();

        debug!(
            "Season {}: {} of {} subject games qualify",
            season,
            qualifying.len(),
            subject_games.len()
        );
        if qualifying.is_empty() {
            return Ok(Vec::new());
        }

        let mut opponents: Vec<&str> = Vec::new();
        for game in &qualifying {
            if !opponents.contains(&game.opponent_id.as_str()) {
                opponents.push(&game.opponent_id);
            }
        }
        let mut schedules = self.prefetch(&opponents, season).await;

        let mut rows = Vec::with_capacity(qualifying.len());
        for game in qualifying {
            let strategy = select_strategy(game.season_type, game.result, query.follow_mode);
            let current: &[GameRecord] = match schedules.get(&(game.opponent_id.clone(), season)) {
                Some(Some(games)) => games.as_slice(),
                Some(None) => {
                    // Unknown schedule: no bye or next-season guess
                    rows.push(LinkedGameRow::link(game, None, false));
                    continue;
                }
                None => &[],
            };

            let opener = match resolve_in_season(strategy, game, current) {
                InSeasonOutcome::Found(next) => {
                    rows.push(LinkedGameRow::link(game, Some(next), false));
                    continue;
                }
                InSeasonOutcome::Bye => {
                    rows.push(LinkedGameRow::link(game, None, true));
                    continue;
                }
                InSeasonOutcome::Unresolved => {
                    debug!(
                        "No follow-up for {} vs {} on {}",
                        query.subject_team_id, game.opponent_id, game.date
                    );
                    rows.push(LinkedGameRow::link(game, None, false));
                    continue;
                }
                InSeasonOutcome::NextSeason(opener) => opener,
            };

            let next_season = season + 1;
            let next_games = self
                .following_season(&mut schedules, &game.opponent_id, next_season)
                .await;
            let next = pick_season_opener(opener, next_games, next_season);
            rows.push(LinkedGameRow::link(game, next, false));
        }

        Ok(rows)
    }

    async fn subject_schedule(&self, team_id: &str, season: i32) -> Result<Vec<GameRecord>, AppError> {
        match self.provider.get_schedule(team_id, season).await {
            Ok(games) => Ok(games),
            Err(e @ AppError::InvalidTeamId { .. }) => Err(e),
            Err(e) => {
                error!("Schedule for team {} season {} unavailable: {}", team_id, season, e);
                Err(AppError::data_unavailable(team_id, season, e.to_string()))
            }
        }
    }

    async fn opponent_schedule(&self, team_id: &str, season: i32) -> Option<Vec<GameRecord>> {
        match self.provider.get_schedule(team_id, season).await {
            Ok(games) => Some(games),
            Err(e) => {
                warn!(
                    "Opponent schedule for team {} season {} unavailable, rows get no verdict: {}",
                    team_id, season, e
                );
                None
            }
        }
    }

    async fn prefetch(&self, opponents: &[&str], season: i32) -> ScheduleMemo {
        stream::iter(opponents.iter().map(|id| id.to_string()))
            .map(|id| async move {
                let games = self.opponent_schedule(&id, season).await;
                ((id, season), games)
            })
            .buffer_unordered(self.max_concurrent_fetches)
            .collect()
            .await
    }

    async fn following_season<'s>(
        &self,
        schedules: &'s mut ScheduleMemo,
        team_id: &str,
        season: i32,
    ) -> &'s [GameRecord] {
        let key = (team_id.to_string(), season);
        if !schedules.contains_key(&key) {
            let games = self.opponent_schedule(team_id, season).await;
            schedules.insert(key.clone(), games);
        }
        schedules
            .get(&key)
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }
}

/// Computes rows with the default fetch concurrency.
pub async fn compute_flu<P: ScheduleProvider>(
    provider: &P,
    query: &FluQuery,
) -> Result<Vec<LinkedGameRow>, AppError> {
    FluEngine::new(provider).compute(query).await
}
