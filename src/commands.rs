use crate::cli::Args;
use crate::config::Config;
use crate::constants::{DEFAULT_API_DOMAIN, DEFAULT_SUBJECT_TEAM_ID, DEFAULT_SUBJECT_TEAM_SLUG};
use crate::data_fetcher::models::{Team, TeamDirectory};
use crate::data_fetcher::provider::validate_team_id;
use crate::data_fetcher::{CachingScheduleProvider, EspnScheduleProvider, fetch_team_directory};
use crate::error::AppError;
use crate::flu::{FluEngine, FluQuery, by_season, compare_teams, summarize};
use crate::report;
use crossterm::{execute, terminal::SetTitle};
use std::io::{IsTerminal, stdout};
use tracing::{info, warn};

const TITLE: &str = "Honolulu Flu";

/// Message shown when a request yields no rows.
pub const NO_GAMES_MESSAGE: &str = "No games to display for the selected filters.";

type Provider = CachingScheduleProvider<EspnScheduleProvider>;

fn build_provider(config: &Config) -> Result<Provider, AppError> {
    let espn = EspnScheduleProvider::from_config(config)?;
    Ok(CachingScheduleProvider::from_config(espn, config))
}

fn use_color(args: &Args) -> bool {
    !args.json && stdout().is_terminal()
}

/// Picks the subject team out of the directory.
///
/// Without a directory only a plain ESPN id (or the default team) can be
/// used; the team's name is then unknown.
pub fn resolve_subject(
    query: &str,
    directory: Result<&TeamDirectory, &AppError>,
) -> Result<Team, AppError> {
    match directory {
        Ok(directory) => directory.resolve(query).cloned(),
        Err(e) => {
            let id = if query.eq_ignore_ascii_case(DEFAULT_SUBJECT_TEAM_SLUG) {
                DEFAULT_SUBJECT_TEAM_ID
            } else {
                query
            };
            if validate_team_id(id).is_err() {
                return Err(AppError::config_error(format!(
                    "Cannot resolve team '{query}' without the team directory: {e}"
                )));
            }
            warn!("Team directory unavailable ({}), using team id {}", e, id);
            Ok(Team {
                id: id.to_string(),
                display_name: format!("Team {id}"),
                abbreviation: String::new(),
                nickname: id.to_string(),
                color: None,
            })
        }
    }
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TITLE))?;
    Config::display().await?;
    Ok(())
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// An empty `--config` value resets the API domain to the ESPN default.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_else(|e| {
        warn!("Existing config could not be loaded, starting from defaults: {}", e);
        Config::default()
    });

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = if new_domain.trim().is_empty() {
            DEFAULT_API_DOMAIN.to_string()
        } else {
            new_domain.trim().to_string()
        };
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Handles --list-teams.
pub async fn handle_list_teams_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let provider = build_provider(config)?;
    let directory = fetch_team_directory(provider.inner().client(), &config.api_domain).await?;
    let teams = directory.sorted_by_name();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&teams)?);
    } else {
        report::render_teams(&mut stdout(), &teams, use_color(args))?;
    }
    Ok(())
}

/// Handles the default action: the flu report for one team.
pub async fn handle_flu_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let provider = build_provider(config)?;
    let directory = fetch_team_directory(provider.inner().client(), &config.api_domain).await;
    let team = resolve_subject(&args.team, directory.as_ref())?;

    let query = FluQuery::for_range(
        team.id.clone(),
        args.from,
        args.through,
        args.play_mode,
        args.follow_mode,
    );
    if query.seasons.is_empty() {
        eprintln!("Through season must be the same as or after from season.");
        println!("{NO_GAMES_MESSAGE}");
        return Ok(());
    }

    let engine = FluEngine::new(&provider).with_concurrency(config.max_concurrent_fetches);
    let rows = engine.compute(&query).await?;
    let summary = summarize(&rows);
    let seasons = by_season(&rows);

    if args.json {
        println!("{}", report::report_json(&team, &query, &rows, summary, &seasons)?);
    } else {
        execute!(stdout(), SetTitle(format!("{TITLE} · {}", team.display_name)))?;
        println!(
            "{} · {} · {} · Seasons {}–{}\n",
            team.display_name,
            query.play_mode,
            query.follow_mode,
            args.from,
            args.through
        );
        if rows.is_empty() {
            println!("{NO_GAMES_MESSAGE}");
        } else {
            let mut out = stdout();
            report::render_rows(&mut out, &rows, query.follow_mode, use_color(args))?;
            report::render_summary(&mut out, &summary, &seasons, use_color(args))?;
        }
    }

    log_cache_stats(args, &provider).await;
    Ok(())
}

/// Handles --compare-all.
pub async fn handle_compare_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let provider = build_provider(config)?;
    let directory = fetch_team_directory(provider.inner().client(), &config.api_domain).await?;

    let query = FluQuery::for_range(
        DEFAULT_SUBJECT_TEAM_ID,
        args.from,
        args.through,
        args.play_mode,
        args.follow_mode,
    );
    if query.seasons.is_empty() {
        eprintln!("Through season must be the same as or after from season.");
        println!("{NO_GAMES_MESSAGE}");
        return Ok(());
    }

    let engine = FluEngine::new(&provider).with_concurrency(config.max_concurrent_fetches);
    let standings = compare_teams(&engine, &directory, &query).await;

    if args.json {
        println!("{}", report::standings_json(&query, &standings)?);
    } else {
        execute!(stdout(), SetTitle(format!("{TITLE} · All Teams")))?;
        println!(
            "All teams · {} · {} · Seasons {}–{}\n",
            query.play_mode, query.follow_mode, args.from, args.through
        );
        report::render_standings(&mut stdout(), &standings, use_color(args))?;
    }

    log_cache_stats(args, &provider).await;
    Ok(())
}

async fn log_cache_stats(args: &Args, provider: &Provider) {
    let stats = provider.stats().await;
    info!(
        "Schedule cache: {} hits, {} misses, {}/{} entries",
        stats.hits, stats.misses, stats.entries, stats.capacity
    );
    if args.debug && !args.json {
        println!(
            "\nSchedule cache: {} hits, {} misses, hit rate {}, {}/{} entries",
            stats.hits,
            stats.misses,
            report::format_percentage(stats.hit_rate()),
            stats.entries,
            stats.capacity
        );
    }
}
