pub mod game_parser;
pub mod timestamps;

pub use game_parser::{parse_event, parse_schedule_events, sort_by_kickoff};
pub use timestamps::parse_timestamp;
