pub mod espn;
pub mod game;
pub mod teams;

pub use espn::{EspnEvent, ScheduleResponse, TeamsResponse};
pub use game::{GameRecord, GameResult, SeasonType};
pub use teams::{Team, TeamDirectory};
