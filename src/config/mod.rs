use crate::constants::{self, env_vars};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the sports data API. Should include https:// prefix.
    #[serde(default = "default_api_domain")]
    pub api_domain: String,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
    /// HTTP timeout in seconds for API requests.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// How long a fetched schedule may be served from memory, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    /// Upper bound on opponent schedules fetched at the same time.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

fn default_api_domain() -> String {
    constants::DEFAULT_API_DOMAIN.to_string()
}

fn default_http_timeout() -> u64 {
    constants::DEFAULT_HTTP_TIMEOUT_SECONDS
}

fn default_cache_ttl() -> u64 {
    constants::cache::SCHEDULE_TTL_SECONDS
}

fn default_max_concurrent_fetches() -> usize {
    constants::DEFAULT_MAX_CONCURRENT_FETCHES
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_domain: default_api_domain(),
            log_file_path: None,
            http_timeout_seconds: default_http_timeout(),
            cache_ttl_seconds: default_cache_ttl(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Falls back to defaults when no config file exists.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `HONOLULU_FLU_API_DOMAIN` - Override API domain
    /// - `HONOLULU_FLU_LOG_FILE` - Override log file path
    /// - `HONOLULU_FLU_HTTP_TIMEOUT` - Override HTTP timeout in seconds
    /// - `HONOLULU_FLU_CACHE_TTL` - Override schedule cache TTL in seconds
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(AppError)` - Config file could not be read, parsed or validated
    pub async fn load() -> Result<Self, AppError> {
        let config_path = get_config_path();

        let mut config = if Path::new(&config_path).exists() {
            Self::load_from_path(&config_path).await?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies `HONOLULU_FLU_*` environment overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_domain) = std::env::var(env_vars::API_DOMAIN) {
            self.api_domain = api_domain;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        if let Some(timeout) = std::env::var(env_vars::HTTP_TIMEOUT)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.http_timeout_seconds = timeout;
        }

        if let Some(ttl) = std::env::var(env_vars::CACHE_TTL)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.cache_ttl_seconds = ttl;
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Reports defaults when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let file_exists = Path::new(&config_path).exists();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !file_exists {
            println!("(No file yet, showing defaults)");
        }
        println!("────────────────────────────────────");
        println!("API Domain:");
        println!("{}", config.api_domain);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Schedule Cache TTL:");
        println!("{} seconds", config.cache_ttl_seconds);
        println!("────────────────────────────────────");
        println!("Concurrent Fetches:");
        println!("{}", config.max_concurrent_fetches);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{}.log", constants::APP_NAME);
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and ensures the
    /// API domain has the https:// prefix.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }
        let api_domain = if !self.api_domain.starts_with("https://") {
            format!("https://{}", self.api_domain.trim_start_matches("http://"))
        } else {
            self.api_domain.clone()
        };
        let content = toml::to_string_pretty(&Config {
            api_domain,
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without env overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
