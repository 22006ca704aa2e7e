//! Builders and an in-memory schedule provider for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::data_fetcher::models::{GameRecord, GameResult, SeasonType};
use crate::data_fetcher::processors::sort_by_kickoff;
use crate::data_fetcher::provider::{ScheduleProvider, validate_team_id};
use crate::error::AppError;

/// Fluent builder for [`GameRecord`]s.
#[derive(Debug, Clone)]
pub struct GameBuilder {
    record: GameRecord,
}

impl GameBuilder {
    /// A regular-season game in `week` of `season`, unplayed until [`score`](Self::score).
    pub fn regular(team_id: &str, opponent_id: &str, season: i32, week: i32) -> Self {
        Self::base(team_id, opponent_id, season, SeasonType::Regular)
            .week(week)
            .label(&format!("Week {week}"))
    }

    /// A postseason game; `label` is the round ("Wild Card Round", ...).
    pub fn postseason(team_id: &str, opponent_id: &str, season: i32, label: &str) -> Self {
        Self::base(team_id, opponent_id, season, SeasonType::Postseason).label(label)
    }

    fn base(team_id: &str, opponent_id: &str, season: i32, season_type: SeasonType) -> Self {
        Self {
            record: GameRecord {
                event_id: format!("{team_id}-{opponent_id}-{season}"),
                date: String::new(),
                completed: false,
                season,
                season_type,
                week: None,
                week_label: None,
                is_home: true,
                team_id: team_id.to_string(),
                team_score: None,
                opponent_id: opponent_id.to_string(),
                opponent_name: format!("Team {opponent_id}"),
                opponent_score: None,
                result: None,
            },
        }
    }

    pub fn week(mut self, week: i32) -> Self {
        self.record.week = Some(week);
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.record.week_label = Some(label.to_string());
        self
    }

    /// Kickoff; also makes the event id unique per date.
    pub fn on(mut self, date: &str) -> Self {
        self.record.date = date.to_string();
        self.record.event_id = format!(
            "{}-{}-{}",
            self.record.team_id, self.record.opponent_id, date
        );
        self
    }

    pub fn away(mut self) -> Self {
        self.record.is_home = false;
        self
    }

    pub fn opponent_name(mut self, name: &str) -> Self {
        self.record.opponent_name = name.to_string();
        self
    }

    /// Final score from the team's side; marks the game completed.
    pub fn score(mut self, team_score: i32, opponent_score: i32) -> Self {
        self.record.completed = true;
        self.record.team_score = Some(team_score);
        self.record.opponent_score = Some(opponent_score);
        self.record.result = Some(GameResult::from_scores(team_score, opponent_score));
        self
    }

    pub fn build(self) -> GameRecord {
        self.record
    }
}

/// The same game seen from the opponent's side.
pub fn mirrored(game: &GameRecord) -> GameRecord {
    GameRecord {
        event_id: game.event_id.clone(),
        date: game.date.clone(),
        completed: game.completed,
        season: game.season,
        season_type: game.season_type,
        week: game.week,
        week_label: game.week_label.clone(),
        is_home: !game.is_home,
        team_id: game.opponent_id.clone(),
        team_score: game.opponent_score,
        opponent_id: game.team_id.clone(),
        opponent_name: format!("Team {}", game.team_id),
        opponent_score: game.team_score,
        result: game.result.map(|r| match r {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Tie => GameResult::Tie,
        }),
    }
}

/// In-memory [`ScheduleProvider`] with call counting and injectable failures.
#[derive(Debug, Default)]
pub struct InMemoryScheduleProvider {
    schedules: HashMap<(String, i32), Vec<GameRecord>>,
    failing: HashSet<(String, i32)>,
    calls: AtomicUsize,
}

impl InMemoryScheduleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a game to both teams' schedules.
    pub fn with_game(mut self, game: GameRecord) -> Self {
        self.insert(mirrored(&game));
        self.insert(game);
        self
    }

    /// Adds a game to its own team's schedule only.
    pub fn with_one_sided_game(mut self, game: GameRecord) -> Self {
        self.insert(game);
        self
    }

    /// Makes every fetch of `(team_id, season)` fail.
    pub fn failing(mut self, team_id: &str, season: i32) -> Self {
        self.failing.insert((team_id.to_string(), season));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn insert(&mut self, game: GameRecord) {
        let games = self
            .schedules
            .entry((game.team_id.clone(), game.season))
            .or_default();
        games.push(game);
        sort_by_kickoff(games);
    }
}

impl ScheduleProvider for InMemoryScheduleProvider {
    async fn get_schedule(&self, team_id: &str, season: i32) -> Result<Vec<GameRecord>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        validate_team_id(team_id)?;

        let key = (team_id.to_string(), season);
        if self.failing.contains(&key) {
            return Err(AppError::network_connection(
                format!("memory://teams/{team_id}/schedule?season={season}"),
                "injected failure",
            ));
        }
        Ok(self.schedules.get(&key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_scores_set_result() {
        let game = GameBuilder::regular("8", "9", 2024, 5)
            .on("2024-10-06T17:00Z")
            .score(24, 20)
            .build();
        assert!(game.completed);
        assert_eq!(game.result, Some(GameResult::Win));
        assert_eq!(game.week_label.as_deref(), Some("Week 5"));
    }

    #[test]
    fn test_mirrored_flips_perspective() {
        let game = GameBuilder::regular("8", "9", 2024, 5)
            .on("2024-10-06T17:00Z")
            .away()
            .score(10, 31)
            .build();
        let other = mirrored(&game);
        assert_eq!(other.team_id, "9");
        assert_eq!(other.opponent_id, "8");
        assert!(other.is_home);
        assert_eq!(other.team_score, Some(31));
        assert_eq!(other.result, Some(GameResult::Win));
    }

    #[tokio::test]
    async fn test_in_memory_provider() {
        let provider = InMemoryScheduleProvider::new()
            .with_game(
                GameBuilder::regular("8", "9", 2024, 2)
                    .on("2024-09-15T17:00Z")
                    .score(20, 16)
                    .build(),
            )
            .with_game(
                GameBuilder::regular("8", "3", 2024, 1)
                    .on("2024-09-08T17:00Z")
                    .score(26, 20)
                    .build(),
            )
            .failing("3", 2025);

        let lions = provider.get_schedule("8", 2024).await.unwrap();
        assert_eq!(lions.len(), 2);
        assert_eq!(lions[0].week, Some(1));

        assert_eq!(provider.get_schedule("9", 2024).await.unwrap().len(), 1);
        assert!(provider.get_schedule("9", 2025).await.unwrap().is_empty());
        assert!(provider.get_schedule("3", 2025).await.is_err());
        assert!(provider.get_schedule("bears", 2024).await.is_err());
        assert_eq!(provider.calls(), 5);
    }
}
