use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::build_team_schedule_url;
use crate::config::Config;
use crate::data_fetcher::models::{GameRecord, ScheduleResponse, SeasonType};
use crate::data_fetcher::processors::{parse_schedule_events, sort_by_kickoff};
use crate::data_fetcher::provider::{ScheduleProvider, validate_team_id};
use crate::error::AppError;

/// Schedule provider backed by the ESPN site API.
///
/// Regular season and postseason are separate requests. A failed partition
/// degrades to an empty one; only when every partition fails is the error
/// returned.
#[derive(Debug, Clone)]
pub struct EspnScheduleProvider {
    client: Client,
    api_domain: String,
}

impl EspnScheduleProvider {
    pub fn new(client: Client, api_domain: impl Into<String>) -> Self {
        Self {
            client,
            api_domain: api_domain.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_domain.clone()))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn api_domain(&self) -> &str {
        &self.api_domain
    }

    async fn fetch_partition(
        &self,
        team_id: &str,
        season: i32,
        season_type: SeasonType,
    ) -> Result<Vec<GameRecord>, AppError> {
        let url = build_team_schedule_url(&self.api_domain, team_id, season, season_type);
        let response = fetch::<ScheduleResponse>(&self.client, &url).await?;
        Ok(parse_schedule_events(team_id, season, response.events))
    }
}

impl ScheduleProvider for EspnScheduleProvider {
    #[instrument(skip(self))]
    async fn get_schedule(&self, team_id: &str, season: i32) -> Result<Vec<GameRecord>, AppError> {
        validate_team_id(team_id)?;

        let partitions = SeasonType::ALL.map(|season_type| async move {
            (
                season_type,
                self.fetch_partition(team_id, season, season_type).await,
            )
        });
        let results = futures::future::join_all(partitions).await;

        let mut games = Vec::new();
        let mut failed = 0usize;
        let mut last_error = None;
        for (season_type, result) in results {
            match result {
                Ok(partition) => games.extend(partition),
                Err(e) => {
                    if e.is_not_found() {
                        debug!(
                            "No {:?} schedule for team {} season {}: {}",
                            season_type, team_id, season, e
                        );
                    } else {
                        warn!(
                            "Failed to fetch {:?} schedule for team {} season {}: {}",
                            season_type, team_id, season, e
                        );
                    }
                    failed += 1;
                    last_error = Some(e);
                }
            }
        }

        if failed == SeasonType::ALL.len()
            && let Some(e) = last_error
        {
            return Err(e);
        }

        sort_by_kickoff(&mut games);
        info!(
            "Fetched {} games for team {} season {}",
            games.len(),
            team_id,
            season
        );
        Ok(games)
    }
}
