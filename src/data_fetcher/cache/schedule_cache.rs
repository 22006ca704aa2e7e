//! LRU schedule cache wrapped around any [`ScheduleProvider`]

use chrono::{Duration, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::types::{CacheStats, CachedSchedule};
use crate::config::Config;
use crate::constants::cache;
use crate::data_fetcher::models::GameRecord;
use crate::data_fetcher::provider::ScheduleProvider;
use crate::error::AppError;

type ScheduleKey = (String, i32);

/// Caches successful `(team, season)` schedules from the inner provider.
///
/// Entries expire on their TTL or when a post-game window opens after they
/// were fetched. Errors are passed through and never cached.
pub struct CachingScheduleProvider<P> {
    inner: P,
    entries: RwLock<LruCache<ScheduleKey, CachedSchedule>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: ScheduleProvider> CachingScheduleProvider<P> {
    pub fn new(inner: P, capacity: usize, ttl_seconds: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            inner,
            entries: RwLock::new(LruCache::new(capacity)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn with_defaults(inner: P) -> Self {
        Self::new(inner, cache::SCHEDULE_CAPACITY, cache::SCHEDULE_TTL_SECONDS)
    }

    pub fn from_config(inner: P, config: &Config) -> Self {
        Self::new(inner, cache::SCHEDULE_CAPACITY, config.cache_ttl_seconds)
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: entries.len(),
            capacity: entries.cap().get(),
        }
    }

    async fn lookup(&self, key: &ScheduleKey) -> Option<Vec<GameRecord>> {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        let stale = match entries.get(key) {
            Some(entry) if !entry.is_stale_at(now) => {
                debug!(
                    "Cache hit for team {} season {}: {} games, age={}s",
                    key.0,
                    key.1,
                    entry.games.len(),
                    entry.age_at(now).num_seconds()
                );
                return Some(entry.games.clone());
            }
            Some(_) => true,
            None => false,
        };
        if stale {
            debug!("Removing stale cache entry for team {} season {}", key.0, key.1);
            entries.pop(key);
        }
        None
    }
}

impl<P: ScheduleProvider> ScheduleProvider for CachingScheduleProvider<P> {
    #[instrument(skip(self))]
    async fn get_schedule(&self, team_id: &str, season: i32) -> Result<Vec<GameRecord>, AppError> {
        let key = (team_id.to_string(), season);

        if let Some(games) = self.lookup(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(games);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for team {} season {}", team_id, season);

        let games = self.inner.get_schedule(team_id, season).await?;
        let entry = CachedSchedule::new(games.clone(), Utc::now(), self.ttl);
        self.entries.write().await.put(key, entry);
        Ok(games)
    }
}
