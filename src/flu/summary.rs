//! Aggregate flu statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use super::engine::{FluEngine, LinkedGameRow};
use super::query::FluQuery;
use crate::data_fetcher::models::{Team, TeamDirectory};
use crate::data_fetcher::provider::ScheduleProvider;

/// Loss count over rows with a verdict. Rows without a follow-up result
/// (byes, unresolved) are not considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FluSummary {
    pub losses: usize,
    pub considered: usize,
    /// `None` when nothing was considered
    pub percentage: Option<f64>,
}

impl FluSummary {
    pub fn from_counts(losses: usize, considered: usize) -> Self {
        let percentage = (considered > 0).then(|| losses as f64 / considered as f64 * 100.0);
        Self {
            losses,
            considered,
            percentage,
        }
    }

    pub fn wins(&self) -> usize {
        self.considered - self.losses
    }
}

pub fn summarize(rows: &[LinkedGameRow]) -> FluSummary {
    let verdicts = rows.iter().filter_map(LinkedGameRow::flu);
    let (losses, considered) = verdicts.fold((0, 0), |(losses, considered), flu| {
        (losses + usize::from(flu), considered + 1)
    });
    FluSummary::from_counts(losses, considered)
}

/// Per-season summaries in ascending season order.
pub fn by_season(rows: &[LinkedGameRow]) -> BTreeMap<i32, FluSummary> {
    let mut counts: BTreeMap<i32, (usize, usize)> = BTreeMap::new();
    for row in rows {
        let (losses, considered) = counts.entry(row.season).or_default();
        if let Some(flu) = row.flu() {
            *losses += usize::from(flu);
            *considered += 1;
        }
    }
    counts
        .into_iter()
        .map(|(season, (losses, considered))| (season, FluSummary::from_counts(losses, considered)))
        .collect()
}

/// One team's line in the league comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: Team,
    pub summary: FluSummary,
    /// Set when the team's computation failed
    pub error: Option<String>,
}

/// Percentage descending (teams without one last), then considered
/// descending, then name.
pub fn rank_standings(standings: &mut [TeamStanding]) {
    standings.sort_by(|a, b| {
        let pa = a.summary.percentage.unwrap_or(f64::NEG_INFINITY);
        let pb = b.summary.percentage.unwrap_or(f64::NEG_INFINITY);
        pb.total_cmp(&pa)
            .then_with(|| b.summary.considered.cmp(&a.summary.considered))
            .then_with(|| a.team.display_name.cmp(&b.team.display_name))
    });
}

/// Runs `query`'s filters for every team in the directory, ranked.
///
/// A team whose computation fails is kept with zero considered games.
pub async fn compare_teams<P: ScheduleProvider>(
    engine: &FluEngine<'_, P>,
    directory: &TeamDirectory,
    query: &FluQuery,
) -> Vec<TeamStanding> {
    let mut standings = Vec::with_capacity(directory.len());

    for team in directory.teams() {
        let team_query = query.with_subject(team.id.clone());
        let standing = match engine.compute(&team_query).await {
            Ok(rows) => TeamStanding {
                team: team.clone(),
                summary: summarize(&rows),
                error: None,
            },
            Err(e) => {
                warn!("Comparison skipped {} ({}): {}", team.display_name, team.id, e);
                TeamStanding {
                    team: team.clone(),
                    summary: FluSummary::default(),
                    error: Some(e.to_string()),
                }
            }
        };
        standings.push(standing);
    }

    rank_standings(&mut standings);
    info!("Compared {} teams", standings.len());
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::GameResult;
    use crate::flu::query::{FollowMode, PlayMode};
    use crate::testing_utils::{GameBuilder, InMemoryScheduleProvider};

    fn row(season: i32, next_result: Option<GameResult>) -> LinkedGameRow {
        let subject = GameBuilder::regular("8", "9", season, 3)
            .on("2024-09-22T17:00Z")
            .score(20, 13)
            .build();
        let mut row = LinkedGameRow::link(&subject, None, false);
        row.next_result = next_result;
        row
    }

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: id.to_string(),
            display_name: name.to_string(),
            abbreviation: String::new(),
            nickname: name.to_string(),
            color: None,
        }
    }

    #[test]
    fn test_summarize_excludes_rows_without_verdict() {
        let rows = vec![
            row(2024, Some(GameResult::Loss)),
            row(2024, Some(GameResult::Win)),
            row(2024, Some(GameResult::Tie)),
            row(2024, None),
        ];
        let summary = summarize(&rows);

        assert_eq!(summary.losses, 1);
        assert_eq!(summary.considered, 3);
        assert_eq!(summary.wins(), 2);
        let pct = summary.percentage.unwrap();
        assert!((pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty_has_no_percentage() {
        let summary = summarize(&[row(2024, None)]);
        assert_eq!(summary.considered, 0);
        assert_eq!(summary.percentage, None);
    }

    #[test]
    fn test_by_season() {
        let rows = vec![
            row(2024, Some(GameResult::Loss)),
            row(2023, Some(GameResult::Win)),
            row(2024, Some(GameResult::Loss)),
        ];
        let seasons = by_season(&rows);

        let keys: Vec<i32> = seasons.keys().copied().collect();
        assert_eq!(keys, vec![2023, 2024]);
        assert_eq!(seasons[&2024].percentage, Some(100.0));
        assert_eq!(seasons[&2023].percentage, Some(0.0));
    }

    #[test]
    fn test_rank_standings() {
        let standing = |id: &str, name: &str, losses, considered| TeamStanding {
            team: team(id, name),
            summary: FluSummary::from_counts(losses, considered),
            error: None,
        };
        let mut standings = vec![
            standing("1", "Alpha", 0, 0),
            standing("2", "Bravo", 1, 4),
            standing("3", "Charlie", 2, 4),
            standing("4", "Delta", 2, 8),
            standing("5", "Echo", 1, 4),
        ];
        rank_standings(&mut standings);

        let names: Vec<&str> = standings.iter().map(|s| s.team.display_name.as_str()).collect();
        assert_eq!(names, vec!["Charlie", "Delta", "Bravo", "Echo", "Alpha"]);
    }

    #[tokio::test]
    async fn test_compare_teams_keeps_failed_team() {
        let provider = InMemoryScheduleProvider::new()
            .with_game(
                GameBuilder::regular("8", "9", 2024, 5)
                    .on("2024-10-06T17:00Z")
                    .score(24, 20)
                    .build(),
            )
            .with_game(
                GameBuilder::regular("9", "4", 2024, 6)
                    .on("2024-10-13T17:00Z")
                    .score(10, 31)
                    .build(),
            )
            .failing("3", 2024);
        let directory = TeamDirectory::new(vec![
            team("8", "Detroit Lions"),
            team("3", "Chicago Bears"),
        ]);
        let query = FluQuery::new("8", vec![2024], PlayMode::Any, FollowMode::NextWeek);

        let engine = FluEngine::new(&provider);
        let standings = compare_teams(&engine, &directory, &query).await;

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].team.id, "8");
        assert_eq!(standings[0].summary.percentage, Some(100.0));
        assert_eq!(standings[1].team.id, "3");
        assert_eq!(standings[1].summary.considered, 0);
        assert!(standings[1].error.is_some());
    }
}
