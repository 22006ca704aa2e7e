//! Cache entry with TTL and game-window staleness

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::refresh_policy::window_passed_since;
use crate::data_fetcher::models::GameRecord;

/// A team-season schedule as fetched from the inner provider.
#[derive(Debug, Clone)]
pub struct CachedSchedule {
    pub games: Vec<GameRecord>,
    pub fetched_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CachedSchedule {
    pub fn new(games: Vec<GameRecord>, fetched_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            games,
            fetched_at,
            ttl,
        }
    }

    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.fetched_at)
    }

    /// Stale when older than the TTL or when a post-game window opened
    /// after the entry was fetched.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        let age = self.age_at(now);
        let expired = age > self.ttl;
        let window = window_passed_since(self.fetched_at, now);

        debug!(
            "Cache staleness check: age={}s, ttl={}s, expired={}, window_passed={}",
            age.num_seconds(),
            self.ttl.num_seconds(),
            expired,
            window
        );

        expired || window
    }
}

/// Hit/miss counters exposed for debug output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        (total > 0).then(|| self.hits as f64 / total as f64 * 100.0)
    }
}
