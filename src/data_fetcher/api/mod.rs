//! ESPN site API access
//!
//! - `http_client`: reqwest client construction
//! - `urls`: endpoint URL builders
//! - `fetch_utils`: GET + JSON decode with retry and error mapping
//! - `schedule_api`: [`EspnScheduleProvider`], the network-backed schedule provider
//! - `teams_api`: team directory lookup

pub mod fetch_utils;
pub mod http_client;
pub mod schedule_api;
pub mod teams_api;
pub mod urls;

pub use fetch_utils::fetch;
pub use http_client::create_http_client_with_timeout;
pub use schedule_api::EspnScheduleProvider;
pub use teams_api::fetch_team_directory;
pub use urls::{build_team_schedule_url, build_teams_url};
