//! The schedule-fetch boundary the flu engine consumes.

use std::future::Future;

use crate::data_fetcher::models::GameRecord;
use crate::error::AppError;

/// Source of normalized team schedules.
///
/// Implementations return every regular-season and postseason game they can
/// obtain for the team-season pair, ascending by kickoff. "No games" is an
/// empty vector, never an error; errors are reserved for transport-level
/// failures and malformed team identifiers.
pub trait ScheduleProvider: Send + Sync {
    fn get_schedule(
        &self,
        team_id: &str,
        season: i32,
    ) -> impl Future<Output = Result<Vec<GameRecord>, AppError>> + Send;
}

/// ESPN team ids are short decimal strings ("8", "34").
pub fn validate_team_id(team_id: &str) -> Result<(), AppError> {
    if !team_id.is_empty() && team_id.len() <= 4 && team_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::invalid_team_id(team_id))
    }
}
