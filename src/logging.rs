use crate::cli::Args;
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter() -> Result<EnvFilter, AppError> {
    let directive = format!("{APP_NAME}=info")
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Resolves the log directory and file name.
///
/// `--log-file` wins over the configured path; without either the default
/// log directory is used.
pub fn resolve_log_location(cli_path: Option<&str>, config_path: Option<&str>) -> (String, String) {
    let default_file_name = format!("{APP_NAME}.log");
    match cli_path.or(config_path) {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(String::from)
                .unwrap_or(default_file_name);
            (parent.to_string_lossy().to_string(), file_name)
        }
        None => (Config::get_log_dir_path(), default_file_name),
    }
}

/// Sets up logging configuration for the application.
///
/// - Always logs to a daily rolling file
/// - `--debug` mirrors logs to stdout
/// - Creates the log directory if it doesn't exist
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub async fn setup_logging(args: &Args) -> Result<(String, WorkerGuard), AppError> {
    // Config errors are reported later by the command itself
    let config_log_path = Config::load()
        .await
        .ok()
        .and_then(|config| config.log_file_path);

    let (log_dir, log_file_name) =
        resolve_log_location(args.log_file.as_deref(), config_log_path.as_deref());

    if !Path::new(&log_dir).exists() {
        tokio::fs::create_dir_all(&log_dir).await.map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter()?);

    let registry = tracing_subscriber::registry().with(file_layer);
    let init_result = if args.debug {
        registry
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(true)
                    .with_filter(env_filter()?),
            )
            .try_init()
    } else {
        registry.try_init()
    };
    init_result.map_err(|e| AppError::log_setup_error(format!("Failed to install subscriber: {e}")))?;

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}
