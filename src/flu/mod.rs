//! Honolulu flu computation
//!
//! Links each completed subject-team game to the opponent's following game
//! and records whether the opponent lost it.
//!
//! - `query`: play/follow modes and season ranges
//! - `resolution`: follow-up strategy selection and schedule pickers
//! - `engine`: [`FluEngine`] and [`LinkedGameRow`]
//! - `summary`: percentages, per-season breakdown and league comparison

pub mod engine;
pub mod query;
pub mod resolution;
pub mod summary;

pub use engine::{FluEngine, LinkedGameRow, compute_flu};
pub use query::{FluQuery, FollowMode, PlayMode, season_range};
pub use resolution::{FollowUpStrategy, select_strategy};
pub use summary::{FluSummary, TeamStanding, by_season, compare_teams, rank_standings, summarize};
