pub mod api;
pub mod cache;
pub mod models;
pub mod processors;
pub mod provider;

pub use api::{EspnScheduleProvider, fetch_team_directory};
pub use cache::CachingScheduleProvider;
pub use models::{GameRecord, GameResult, SeasonType, Team, TeamDirectory};
pub use provider::ScheduleProvider;
