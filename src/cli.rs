use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::constants::{DEFAULT_SUBJECT_TEAM_SLUG, seasons};
use crate::flu::{FollowMode, PlayMode};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Whether the arguments only touch configuration and need no network access.
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_domain.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Honolulu Flu
///
/// Does beating (or just playing) a team leave it sick? For every completed
/// game of the chosen team, looks up the opponent's following game and
/// reports how often the opponent lost it.
///
/// Playoff games: if the team lost, the opponent's next playoff game is
/// used; if the team won, the opponent's first regular-season game of the
/// next season. In week mode a bye is shown as "Bye" and excluded from
/// the percentage.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Team to analyze: ESPN id, nickname, abbreviation or full name.
    #[arg(short, long, default_value = DEFAULT_SUBJECT_TEAM_SLUG, help_heading = "Analysis")]
    pub team: String,

    /// First season (year the season started).
    #[arg(long, default_value_t = seasons::DEFAULT_FROM, help_heading = "Analysis")]
    pub from: i32,

    /// Last season, inclusive.
    #[arg(long, default_value_t = seasons::DEFAULT_THROUGH, help_heading = "Analysis")]
    pub through: i32,

    /// Games to include: every completed game, or only games the team won.
    #[arg(long = "play", value_enum, default_value_t = PlayMode::Any, help_heading = "Analysis")]
    pub play_mode: PlayMode,

    /// What counts as the opponent's following game for regular-season
    /// games: the next NFL week (byes detected) or the next played game.
    #[arg(long = "follow", value_enum, default_value_t = FollowMode::NextWeek, help_heading = "Analysis")]
    pub follow_mode: FollowMode,

    /// Rank every team in the league with the same filters.
    #[arg(long = "compare-all", help_heading = "Analysis")]
    pub compare_all: bool,

    /// List teams with the identifiers accepted by --team.
    #[arg(long = "list-teams", help_heading = "Analysis")]
    pub list_teams: bool,

    /// Print results as JSON instead of a table.
    #[arg(long, help_heading = "Display Options")]
    pub json: bool,

    /// Update API domain in config. Resets to the ESPN default if no value is given.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_DOMAIN",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Enable debug mode: logs are mirrored to the terminal and cache
    /// statistics are printed at exit.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}
