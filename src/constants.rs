//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers and configuration constants
//! so the fetch, cache and engine layers agree on them.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 20;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 32;

/// Default number of opponent schedules fetched concurrently
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// ESPN site API base for NFL data
pub const DEFAULT_API_DOMAIN: &str = "https://site.api.espn.com/apis/site/v2/sports/football/nfl";

/// ESPN team id for the Detroit Lions, the default subject team
pub const DEFAULT_SUBJECT_TEAM_ID: &str = "8";

/// Default nickname slug for the subject team
pub const DEFAULT_SUBJECT_TEAM_SLUG: &str = "lions";

/// Application name used for config and log directories
pub const APP_NAME: &str = "honolulu_flu";

/// Cache sizing and TTL values
pub mod cache {
    /// Maximum number of (team, season) schedules held in memory
    pub const SCHEDULE_CAPACITY: usize = 256;

    /// Default TTL for a cached schedule (6 hours)
    pub const SCHEDULE_TTL_SECONDS: u64 = 6 * 60 * 60;
}

/// Retry configuration for the fetch utility
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Initial backoff delay (milliseconds), doubled on every attempt
    pub const BASE_DELAY_MS: u64 = 250;
}

/// Season filter defaults for the CLI
pub mod seasons {
    /// Default first season in the requested range
    pub const DEFAULT_FROM: i32 = 2024;

    /// Default last season in the requested range
    pub const DEFAULT_THROUGH: i32 = 2025;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "HONOLULU_FLU_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "HONOLULU_FLU_LOG_FILE";

    /// Environment variable for HTTP timeout override (seconds)
    pub const HTTP_TIMEOUT: &str = "HONOLULU_FLU_HTTP_TIMEOUT";

    /// Environment variable for schedule cache TTL override (seconds)
    pub const CACHE_TTL: &str = "HONOLULU_FLU_CACHE_TTL";
}
