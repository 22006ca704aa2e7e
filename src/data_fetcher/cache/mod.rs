pub mod refresh_policy;
pub mod schedule_cache;
pub mod types;

pub use refresh_policy::{latest_window_start, window_passed_since};
pub use schedule_cache::CachingScheduleProvider;
pub use types::{CacheStats, CachedSchedule};
