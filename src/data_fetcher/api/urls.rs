//! URL building utilities for API endpoints

use crate::data_fetcher::models::SeasonType;

/// Builds the team schedule URL for one season partition.
///
/// # Example
/// ```
/// use honolulu_flu::data_fetcher::api::build_team_schedule_url;
/// use honolulu_flu::data_fetcher::models::SeasonType;
///
/// let url = build_team_schedule_url("https://api.example.com", "8", 2024, SeasonType::Postseason);
/// assert_eq!(url, "https://api.example.com/teams/8/schedule?season=2024&seasontype=3");
/// ```
pub fn build_team_schedule_url(
    api_domain: &str,
    team_id: &str,
    season: i32,
    season_type: SeasonType,
) -> String {
    format!(
        "{}/teams/{team_id}/schedule?season={season}&seasontype={}",
        api_domain.trim_end_matches('/'),
        season_type.code()
    )
}

/// Builds the team directory URL.
///
/// # Example
/// ```
/// use honolulu_flu::data_fetcher::api::build_teams_url;
///
/// assert_eq!(build_teams_url("https://api.example.com/"), "https://api.example.com/teams");
/// ```
pub fn build_teams_url(api_domain: &str) -> String {
    format!("{}/teams", api_domain.trim_end_matches('/'))
}
