//! End-to-end runs of the flu engine against a mocked ESPN site API.

use honolulu_flu::data_fetcher::api::create_http_client_with_timeout;
use honolulu_flu::data_fetcher::{CachingScheduleProvider, EspnScheduleProvider, fetch_team_directory};
use honolulu_flu::flu::{FluEngine, FluQuery, FollowMode, PlayMode, summarize};
use honolulu_flu::{AppError, GameResult, ScheduleProvider};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

struct Side<'a> {
    id: &'a str,
    name: &'a str,
    score: i32,
}

fn event(id: &str, date: &str, week: i32, home: Side<'_>, away: Side<'_>) -> Value {
    json!({
        "id": id,
        "date": date,
        "season": {"year": 2024},
        "seasonType": {"type": 2},
        "week": {"number": week, "text": format!("Week {week}")},
        "competitions": [{
            "competitors": [
                {"homeAway": "home", "score": {"value": home.score as f64}, "team": {"id": home.id, "displayName": home.name}},
                {"homeAway": "away", "score": {"value": away.score as f64}, "team": {"id": away.id, "displayName": away.name}}
            ],
            "status": {"type": {"completed": true}}
        }]
    })
}

fn lions(score: i32) -> Side<'static> {
    Side { id: "8", name: "Detroit Lions", score }
}

fn rams(score: i32) -> Side<'static> {
    Side { id: "14", name: "Los Angeles Rams", score }
}

fn cardinals(score: i32) -> Side<'static> {
    Side { id: "22", name: "Arizona Cardinals", score }
}

async fn mount_schedule(server: &MockServer, team_id: &str, season_type: &str, events: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/teams/{team_id}/schedule")))
        .and(query_param("season", "2024"))
        .and(query_param("seasontype", season_type))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": events })))
        .mount(server)
        .await;
}

/// Lions beat the Rams in week 1; the Rams lose at home to the Cardinals in week 2.
async fn mount_two_week_league(server: &MockServer) {
    let opener = event("401", "2024-09-09T00:20Z", 1, lions(26), rams(20));
    let rams_week_two = event("402", "2024-09-15T20:05Z", 2, rams(10), cardinals(41));

    mount_schedule(server, "8", "2", vec![opener.clone()]).await;
    mount_schedule(server, "14", "2", vec![opener, rams_week_two]).await;
    mount_schedule(server, "8", "3", vec![]).await;
    mount_schedule(server, "14", "3", vec![]).await;
}

fn espn_provider(server: &MockServer) -> EspnScheduleProvider {
    let client = create_http_client_with_timeout(5).unwrap();
    EspnScheduleProvider::new(client, server.uri())
}

#[tokio::test]
async fn test_flu_rows_from_mocked_api() {
    let server = MockServer::start().await;
    mount_two_week_league(&server).await;

    let provider = espn_provider(&server);
    let query = FluQuery::new("8", vec![2024], PlayMode::Any, FollowMode::NextWeek);
    let rows = FluEngine::new(&provider).compute(&query).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.opponent_id, "14");
    assert_eq!(row.opponent_name, "Los Angeles Rams");
    assert_eq!(row.result, Some(GameResult::Win));
    assert!(row.is_home);

    assert_eq!(row.next_week, Some(2));
    assert_eq!(row.next_result, Some(GameResult::Loss));
    assert_eq!(row.next_opponent_name.as_deref(), Some("Arizona Cardinals"));
    assert_eq!(row.next_opponent_is_home, Some(true));
    assert_eq!((row.next_team_score, row.next_opponent_score), (Some(10), Some(41)));
    assert!(!row.cross_season);
    assert_eq!(row.flu(), Some(true));

    let summary = summarize(&rows);
    assert_eq!((summary.losses, summary.considered), (1, 1));
}

#[tokio::test]
async fn test_cached_provider_hits_network_once_per_partition() {
    let server = MockServer::start().await;
    let opener = event("401", "2024-09-09T00:20Z", 1, lions(26), rams(20));
    Mock::given(method("GET"))
        .and(path("/teams/8/schedule"))
        .and(query_param("seasontype", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [opener] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/teams/8/schedule"))
        .and(query_param("seasontype", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let cached = CachingScheduleProvider::with_defaults(espn_provider(&server));
    let first = cached.get_schedule("8", 2024).await.unwrap();
    let second = cached.get_schedule("8", 2024).await.unwrap();

    assert_eq!(first, second);
    let stats = cached.stats().await;
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[tokio::test]
async fn test_subject_fetch_failure_is_data_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = espn_provider(&server);
    let query = FluQuery::new("8", vec![2024], PlayMode::Any, FollowMode::NextWeek);
    let result = FluEngine::new(&provider).compute(&query).await;

    assert!(matches!(result, Err(AppError::DataUnavailable { .. })));
}

#[tokio::test]
async fn test_directory_resolves_slug_for_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sports": [{"leagues": [{"teams": [
                {"team": {"id": "8", "displayName": "Detroit Lions", "abbreviation": "DET", "nickname": "Lions"}},
                {"team": {"id": "14", "displayName": "Los Angeles Rams", "abbreviation": "LAR", "nickname": "Rams"}}
            ]}]}]
        })))
        .mount(&server)
        .await;
    mount_two_week_league(&server).await;

    let provider = espn_provider(&server);
    let directory = fetch_team_directory(provider.client(), provider.api_domain())
        .await
        .unwrap();
    let lions = directory.resolve("lions").unwrap();

    let query = FluQuery::new(lions.id.clone(), vec![2024], PlayMode::WinOnly, FollowMode::NextWeek);
    let rows = FluEngine::new(&provider).compute(&query).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].flu(), Some(true));
}
