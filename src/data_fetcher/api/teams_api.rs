use reqwest::Client;
use tracing::{info, instrument, warn};

use super::fetch_utils::fetch;
use super::urls::build_teams_url;
use crate::data_fetcher::models::{TeamDirectory, TeamsResponse};
use crate::error::AppError;

/// Fetches the league's team directory.
///
/// An empty directory is reported as [`AppError::ApiNoData`] since nothing
/// downstream can resolve a team without it.
#[instrument(skip(client))]
pub async fn fetch_team_directory(client: &Client, api_domain: &str) -> Result<TeamDirectory, AppError> {
    let url = build_teams_url(api_domain);
    let response = fetch::<TeamsResponse>(client, &url).await?;
    let directory = TeamDirectory::from_response(response);

    if directory.is_empty() {
        warn!("Team directory at {} listed no teams", url);
        return Err(AppError::api_no_data("Team directory is empty", url));
    }

    info!("Loaded {} teams", directory.len());
    Ok(directory)
}
