use crate::constants::APP_NAME;
use std::path::{Path, PathBuf};

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_NAME)
}

/// Returns the platform-specific path for the config file.
///
/// Uses the platform config directory (e.g., ~/.config on Linux) and falls
/// back to the current directory when it is unavailable.
pub fn get_config_path() -> String {
    app_dir()
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    app_dir().join("logs").to_string_lossy().to_string()
}
