//! Honolulu Flu
//!
//! Measures how often NFL teams lose the game after playing a given team.
//! Schedules come from the ESPN site API through a [`ScheduleProvider`];
//! the flu engine links each completed game of the subject team to the
//! opponent's following game.
//!
//! # Examples
//!
//! ```rust,no_run
//! use honolulu_flu::data_fetcher::{CachingScheduleProvider, EspnScheduleProvider};
//! use honolulu_flu::flu::{FluEngine, FluQuery, FollowMode, PlayMode, summarize};
//! use honolulu_flu::{AppError, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let provider = CachingScheduleProvider::from_config(
//!         EspnScheduleProvider::from_config(&config)?,
//!         &config,
//!     );
//!
//!     // Detroit Lions, 2023 and 2024 seasons, every completed game
//!     let query = FluQuery::for_range("8", 2023, 2024, PlayMode::Any, FollowMode::NextWeek);
//!     let rows = FluEngine::new(&provider).compute(&query).await?;
//!
//!     let summary = summarize(&rows);
//!     println!("{} of {} opponents lost their next game", summary.losses, summary.considered);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod flu;
pub mod logging;
pub mod report;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::models::{GameRecord, GameResult, SeasonType, Team, TeamDirectory};
pub use data_fetcher::{CachingScheduleProvider, EspnScheduleProvider, ScheduleProvider};
pub use error::AppError;
pub use flu::{FluEngine, FluQuery, FluSummary, FollowMode, LinkedGameRow, PlayMode, compute_flu, summarize};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
