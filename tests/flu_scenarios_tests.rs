use honolulu_flu::flu::{FluQuery, FollowMode, PlayMode, by_season, compute_flu, summarize};
use honolulu_flu::testing_utils::{GameBuilder, InMemoryScheduleProvider};
use honolulu_flu::{GameResult, LinkedGameRow};

const LIONS: &str = "8";
const PACKERS: &str = "9";
const BEARS: &str = "3";
const VIKINGS: &str = "16";
const RAMS: &str = "14";

fn week_query(seasons: Vec<i32>) -> FluQuery {
    FluQuery::new(LIONS, seasons, PlayMode::Any, FollowMode::NextWeek)
}

fn assert_row_invariants(row: &LinkedGameRow) {
    assert_eq!(row.flu().is_some(), row.next_result.is_some());
    if row.after_bye {
        assert_eq!(row.next_result, None);
        assert_eq!(row.flu(), None);
    }
    assert_eq!(
        row.cross_season,
        row.next_season == Some(row.season + 1),
        "cross-season flag must match the follow-up season"
    );
}

/// Scenario A: win in week 5, opponent loses in week 6.
#[tokio::test]
async fn test_opponent_loses_the_following_week() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::regular(LIONS, PACKERS, 2024, 5)
                .on("2024-10-06T17:00Z")
                .score(42, 29)
                .build(),
        )
        .with_game(
            GameBuilder::regular(PACKERS, BEARS, 2024, 6)
                .on("2024-10-13T17:00Z")
                .score(13, 20)
                .build(),
        );

    let rows = compute_flu(&provider, &week_query(vec![2024])).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].next_result, Some(GameResult::Loss));
    assert_eq!(rows[0].flu(), Some(true));
    assert!(!rows[0].cross_season);
    assert_row_invariants(&rows[0]);
}

/// Scenario B: last regular-season game, opponent done for the year.
#[tokio::test]
async fn test_season_finale_falls_back_to_next_season_opener() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::regular(LIONS, BEARS, 2024, 17)
                .on("2024-12-29T17:00Z")
                .score(34, 17)
                .build(),
        )
        .with_game(
            GameBuilder::regular(BEARS, VIKINGS, 2025, 2)
                .on("2025-09-14T17:00Z")
                .score(10, 27)
                .build(),
        )
        .with_game(
            GameBuilder::regular(BEARS, RAMS, 2025, 1)
                .on("2025-09-07T17:00Z")
                .score(24, 21)
                .build(),
        );

    let rows = compute_flu(&provider, &week_query(vec![2024])).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!(row.cross_season);
    assert_eq!(row.next_season, Some(2025));
    assert_eq!(row.next_week, Some(1));
    assert_eq!(row.flu(), Some(false));
    assert_row_invariants(row);
}

/// Scenario C: opponent idle in week 10, plays again in week 11.
#[tokio::test]
async fn test_bye_week_is_not_considered() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::regular(LIONS, RAMS, 2024, 9)
                .on("2024-11-03T17:00Z")
                .score(24, 6)
                .build(),
        )
        .with_game(
            GameBuilder::regular(RAMS, BEARS, 2024, 11)
                .on("2024-11-17T17:00Z")
                .score(3, 30)
                .build(),
        );

    let rows = compute_flu(&provider, &week_query(vec![2024])).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!(row.after_bye);
    assert_eq!(row.flu(), None);
    assert!(!row.has_follow_up());
    assert_row_invariants(row);

    let summary = summarize(&rows);
    assert_eq!(summary.considered, 0);
    assert_eq!(summary.percentage, None);
}

/// In game mode the same bye is skipped and the week 11 game counts.
#[tokio::test]
async fn test_next_played_game_skips_the_bye() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::regular(LIONS, RAMS, 2024, 9)
                .on("2024-11-03T17:00Z")
                .score(24, 6)
                .build(),
        )
        .with_game(
            GameBuilder::regular(RAMS, BEARS, 2024, 11)
                .on("2024-11-17T17:00Z")
                .score(3, 30)
                .build(),
        );
    let query = FluQuery::new(LIONS, vec![2024], PlayMode::Any, FollowMode::NextPlayedGame);

    let rows = compute_flu(&provider, &query).await.unwrap();

    assert!(!rows[0].after_bye);
    assert_eq!(rows[0].next_week, Some(11));
    assert_eq!(rows[0].flu(), Some(true));
}

/// Scenario D: playoff loss, the opponent loses its next playoff game.
#[tokio::test]
async fn test_playoff_loss_follows_opponent_through_the_bracket() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::postseason(LIONS, PACKERS, 2024, "Divisional Round")
                .on("2025-01-18T20:00Z")
                .score(31, 45)
                .build(),
        )
        .with_game(
            GameBuilder::postseason(PACKERS, RAMS, 2024, "Conference Championship")
                .on("2025-01-26T23:30Z")
                .away()
                .score(20, 38)
                .build(),
        )
        .with_game(
            GameBuilder::regular(PACKERS, BEARS, 2025, 1)
                .on("2025-09-07T17:00Z")
                .score(27, 10)
                .build(),
        );

    let rows = compute_flu(&provider, &week_query(vec![2024])).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.next_week_label.as_deref(), Some("Conference Championship"));
    assert_eq!(row.next_opponent_is_home, Some(false));
    assert_eq!(row.flu(), Some(true));
    assert!(!row.cross_season);
    assert_row_invariants(row);
}

/// Wildcard win, the eliminated opponent loses its next-season opener.
#[tokio::test]
async fn test_playoff_win_jumps_to_next_season() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::postseason(LIONS, RAMS, 2023, "Wild Card Round")
                .on("2024-01-14T20:00Z")
                .score(24, 23)
                .build(),
        )
        .with_game(
            GameBuilder::regular(RAMS, LIONS, 2024, 1)
                .on("2024-09-08T20:20Z")
                .away()
                .score(20, 26)
                .build(),
        )
        .with_game(
            GameBuilder::regular(RAMS, VIKINGS, 2024, 2)
                .on("2024-09-15T17:00Z")
                .score(31, 17)
                .build(),
        );
    let rows = compute_flu(&provider, &week_query(vec![2023])).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!(row.cross_season);
    assert_eq!(row.next_week, Some(1));
    assert_eq!(row.next_result, Some(GameResult::Loss));
    assert_eq!(row.flu(), Some(true));
    assert_row_invariants(row);
}

/// Scenario E: wildcard win, the eliminated opponent wins its next opener.
#[tokio::test]
async fn test_playoff_win_with_winning_opener_is_not_flu() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::postseason(LIONS, RAMS, 2023, "Wild Card Round")
                .on("2024-01-14T20:00Z")
                .score(24, 23)
                .build(),
        )
        .with_game(
            GameBuilder::regular(RAMS, VIKINGS, 2024, 1)
                .on("2024-09-08T20:20Z")
                .score(28, 14)
                .build(),
        );

    let rows = compute_flu(&provider, &week_query(vec![2023])).await.unwrap();

    assert_eq!(rows[0].flu(), Some(false));
    assert!(rows[0].cross_season);
    assert_eq!(rows[0].next_season, Some(2024));
}

#[tokio::test]
async fn test_next_played_game_takes_earliest_game_of_next_season() {
    let provider = InMemoryScheduleProvider::new()
        .with_game(
            GameBuilder::regular(LIONS, BEARS, 2024, 18)
                .on("2025-01-05T18:00Z")
                .score(31, 9)
                .build(),
        )
        .with_game(
            GameBuilder::postseason(BEARS, VIKINGS, 2025, "Exhibition")
                .on("2025-08-01T00:00Z")
                .score(17, 24)
                .build(),
        )
        .with_game(
            GameBuilder::regular(BEARS, PACKERS, 2025, 1)
                .on("2025-09-07T17:00Z")
                .score(27, 20)
                .build(),
        );

    let game_query = FluQuery::new(LIONS, vec![2024], PlayMode::Any, FollowMode::NextPlayedGame);
    let rows = compute_flu(&provider, &game_query).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.next_season, Some(2025));
    assert!(row.cross_season);
    assert_eq!(row.next_week_label.as_deref(), Some("Exhibition"));
    assert_eq!(row.next_date.as_deref(), Some("2025-08-01T00:00Z"));
    assert_eq!(row.flu(), Some(true));
    assert_row_invariants(row);

    // Week mode only looks at the regular-season opener
    let rows = compute_flu(&provider, &week_query(vec![2024])).await.unwrap();
    assert_eq!(rows[0].next_week, Some(1));
    assert_eq!(rows[0].flu(), Some(false));
    assert!(rows[0].cross_season);
}

#[tokio::test]
async fn test_reversed_season_range_fetches_nothing() {
    let provider = InMemoryScheduleProvider::new();
    let query = FluQuery::for_range(LIONS, 2025, 2024, PlayMode::Any, FollowMode::NextWeek);

    let rows = compute_flu(&provider, &query).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_percentage_over_a_season() {
    let provider = InMemoryScheduleProvider::new()
        // Week 1: beat the Rams, Rams lose week 2
        .with_game(
            GameBuilder::regular(LIONS, RAMS, 2024, 1)
                .on("2024-09-08T20:20Z")
                .score(26, 20)
                .build(),
        )
        .with_game(
            GameBuilder::regular(RAMS, VIKINGS, 2024, 2)
                .on("2024-09-15T17:00Z")
                .score(10, 28)
                .build(),
        )
        // Week 2: lose to the Bears, who win week 3
        .with_game(
            GameBuilder::regular(LIONS, BEARS, 2024, 2)
                .on("2024-09-15T20:25Z")
                .score(16, 20)
                .build(),
        )
        .with_game(
            GameBuilder::regular(BEARS, PACKERS, 2024, 3)
                .on("2024-09-22T17:00Z")
                .score(30, 27)
                .build(),
        );

    let rows = compute_flu(&provider, &week_query(vec![2024])).await.unwrap();
    for row in &rows {
        assert_row_invariants(row);
    }

    let summary = summarize(&rows);
    assert_eq!(summary.losses, 1);
    assert_eq!(summary.considered, 2);
    assert_eq!(summary.percentage, Some(50.0));
    assert_eq!(by_season(&rows)[&2024], summary);

    let beat_only = FluQuery::new(LIONS, vec![2024], PlayMode::WinOnly, FollowMode::NextWeek);
    let rows = compute_flu(&provider, &beat_only).await.unwrap();
    assert_eq!(summarize(&rows).percentage, Some(100.0));
}
