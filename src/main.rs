// src/main.rs
use clap::Parser;
use honolulu_flu::cli::{Args, is_config_operation};
use honolulu_flu::commands::{
    handle_compare_command, handle_config_update_command, handle_flu_command,
    handle_list_config_command, handle_list_teams_command,
};
use honolulu_flu::logging::setup_logging;
use honolulu_flu::{AppError, Config};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard must stay alive until exit so buffered logs are flushed
    let (log_file_path, guard) = setup_logging(&args).await?;
    info!("Logs are being written to: {log_file_path}");

    if is_config_operation(&args) {
        if args.list_config {
            return handle_list_config_command().await;
        }
        return handle_config_update_command(&args).await;
    }

    let config = Config::load().await?;

    let result = if args.list_teams {
        handle_list_teams_command(&args, &config).await
    } else if args.compare_all {
        handle_compare_command(&args, &config).await
    } else {
        handle_flu_command(&args, &config).await
    };

    if let Err(e) = result {
        error!("Request failed: {e}");
        eprintln!("Failed to fetch data: {e}");
        if e.is_retryable() {
            eprintln!("The ESPN API may be temporarily unavailable. Try again shortly.");
        }
        drop(guard);
        std::process::exit(1);
    }

    Ok(())
}
