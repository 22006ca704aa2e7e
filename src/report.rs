//! Plain-text and JSON rendering of flu results.

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use crate::data_fetcher::models::{GameResult, Team};
use crate::error::AppError;
use crate::flu::{FluQuery, FluSummary, FollowMode, LinkedGameRow, TeamStanding};

const PLACEHOLDER: &str = "—";
const RULE_WIDTH: usize = 96;

fn header_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
fn flu_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
fn healthy_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
fn muted_fg() -> Color {
    Color::AnsiValue(250)
} // Light gray

/// Compact week column: playoff rounds as `WC`/`D`/`C`/`SB`, otherwise the
/// week number.
pub fn short_week_label(week_label: Option<&str>, week: Option<i32>) -> String {
    let fallback = || week.map_or_else(|| PLACEHOLDER.to_string(), |w| w.to_string());
    let Some(label) = week_label.filter(|l| !l.trim().is_empty()) else {
        return fallback();
    };

    let label = label.to_lowercase();
    if label.contains("wild") {
        "WC".to_string()
    } else if label.contains("divisional") {
        "D".to_string()
    } else if label.contains("conference") || label.contains("championship") {
        "C".to_string()
    } else if label.contains("super") {
        "SB".to_string()
    } else {
        fallback()
    }
}

/// Spelled-out form of a short week label, if it has one.
pub fn human_week_text(short_label: &str) -> Option<String> {
    match short_label {
        "WC" => Some("Wildcard".to_string()),
        "D" => Some("Divisional".to_string()),
        "C" => Some("Conference".to_string()),
        "SB" => Some("Super Bowl".to_string()),
        other => other.parse::<i32>().ok().map(|w| format!("Week {w}")),
    }
}

fn home_away(is_home: bool) -> &'static str {
    if is_home { "vs" } else { "@" }
}

pub fn matchup_label(row: &LinkedGameRow) -> String {
    format!("{} {}", home_away(row.is_home), row.opponent_name)
}

/// `W 24–20`, or a placeholder when the score is incomplete.
pub fn subject_outcome(row: &LinkedGameRow) -> String {
    let result = row.result.or(match (row.team_score, row.opponent_score) {
        (Some(a), Some(b)) => Some(GameResult::from_scores(a, b)),
        _ => None,
    });
    match (result, row.team_score, row.opponent_score) {
        (Some(result), Some(a), Some(b)) => format!("{result} {a}–{b}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// The opponent's follow-up game as one cell:
/// `L 10–31 @ Chicago Bears (Week 6)`, `… (2025)` for a following-season
/// game, `Bye`, `TBD vs X` for an unplayed game, or a placeholder.
pub fn follow_up_outcome(row: &LinkedGameRow, follow_mode: FollowMode) -> String {
    if follow_mode == FollowMode::NextWeek && row.after_bye && !row.has_follow_up() {
        return "Bye".to_string();
    }

    let week_suffix = human_week_text(&short_week_label(
        row.next_week_label.as_deref(),
        row.next_week,
    ))
    .map(|text| format!(" ({text})"))
    .unwrap_or_default();
    let venue = home_away(row.next_opponent_is_home.unwrap_or(false));
    let opponent = row.next_opponent_name.as_deref().filter(|n| !n.is_empty());

    let result = row.next_result.or(match (row.next_team_score, row.next_opponent_score) {
        (Some(a), Some(b)) => Some(GameResult::from_scores(a, b)),
        _ => None,
    });

    match (result, row.next_team_score, row.next_opponent_score) {
        (Some(result), Some(a), Some(b)) => {
            let opponent = opponent
                .map(|name| format!(" {venue} {name}"))
                .unwrap_or_default();
            let year_suffix = match row.next_season {
                Some(season) if row.cross_season => format!(" ({season})"),
                _ => String::new(),
            };
            format!("{result} {a}–{b}{opponent}{week_suffix}{year_suffix}")
        }
        _ => match opponent {
            Some(name) => format!("TBD {venue} {name}{week_suffix}"),
            None => PLACEHOLDER.to_string(),
        },
    }
}

pub fn flu_label(flu: Option<bool>) -> &'static str {
    match flu {
        Some(true) => "Yes",
        Some(false) => "No",
        None => PLACEHOLDER,
    }
}

pub fn format_percentage(percentage: Option<f64>) -> String {
    percentage.map_or_else(|| PLACEHOLDER.to_string(), |p| format!("{p:.1}%"))
}

/// Rows ordered by subject game date, newest first. Rows with unusable
/// dates go last.
pub fn most_recent_first(rows: &[LinkedGameRow]) -> Vec<&LinkedGameRow> {
    let mut sorted: Vec<&LinkedGameRow> = rows.iter().collect();
    sorted.sort_by_key(|row| {
        std::cmp::Reverse(crate::data_fetcher::processors::parse_timestamp(&row.date))
    });
    sorted
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

fn write_colored<W: Write>(out: &mut W, text: &str, color: Color, use_color: bool) -> std::io::Result<()> {
    if use_color {
        queue!(out, SetForegroundColor(color), Print(text), ResetColor)
    } else {
        queue!(out, Print(text))
    }
}

/// Game table, most recent first.
pub fn render_rows<W: Write>(
    out: &mut W,
    rows: &[LinkedGameRow],
    follow_mode: FollowMode,
    use_color: bool,
) -> std::io::Result<()> {
    let header = format!(
        "{}{}{}{}{}{}\n",
        pad("Season", 8),
        pad("Week", 6),
        pad("Opponent", 28),
        pad("Result", 10),
        pad("Opp Next Outcome", 52),
        "Flu?"
    );
    write_colored(out, &header, header_fg(), use_color)?;
    write_colored(out, &format!("{}\n", "─".repeat(RULE_WIDTH)), muted_fg(), use_color)?;

    for row in most_recent_first(rows) {
        let line = format!(
            "{}{}{}{}{}",
            pad(&row.season.to_string(), 8),
            pad(&short_week_label(row.week_label.as_deref(), row.week), 6),
            pad(&matchup_label(row), 28),
            pad(&subject_outcome(row), 10),
            pad(&follow_up_outcome(row, follow_mode), 52),
        );
        write_colored(out, &line, text_fg(), use_color)?;

        let flu = row.flu();
        let color = match flu {
            Some(true) => flu_fg(),
            Some(false) => healthy_fg(),
            None => muted_fg(),
        };
        write_colored(out, flu_label(flu), color, use_color)?;
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

/// Headline numbers followed by the per-season breakdown.
pub fn render_summary<W: Write>(
    out: &mut W,
    summary: &FluSummary,
    seasons: &BTreeMap<i32, FluSummary>,
    use_color: bool,
) -> std::io::Result<()> {
    write_colored(out, "\nHonolulu Flu\n", header_fg(), use_color)?;
    writeln!(out, "  Losses:     {}", summary.losses)?;
    writeln!(out, "  Considered: {}", summary.considered)?;
    writeln!(out, "  Flu %:      {}", format_percentage(summary.percentage))?;

    if seasons.len() > 1 {
        write_colored(out, "\nBy season\n", header_fg(), use_color)?;
        for (season, s) in seasons {
            writeln!(
                out,
                "  {season}  {:>3} / {:<3} {}",
                s.losses,
                s.considered,
                format_percentage(s.percentage)
            )?;
        }
    }
    out.flush()
}

/// League comparison table in ranked order.
pub fn render_standings<W: Write>(out: &mut W, standings: &[TeamStanding], use_color: bool) -> std::io::Result<()> {
    let header = format!("{}{}{}{}\n", pad("#", 4), pad("Team", 28), pad("Flu %", 9), "Considered");
    write_colored(out, &header, header_fg(), use_color)?;
    write_colored(out, &format!("{}\n", "─".repeat(52)), muted_fg(), use_color)?;

    for (rank, standing) in standings.iter().enumerate() {
        let considered = if standing.error.is_some() {
            "error".to_string()
        } else {
            standing.summary.considered.to_string()
        };
        writeln!(
            out,
            "{}{}{}{}",
            pad(&(rank + 1).to_string(), 4),
            pad(&standing.team.display_name, 28),
            pad(&format_percentage(standing.summary.percentage), 9),
            considered
        )?;
    }
    out.flush()
}

/// Team directory listing: id, slug, abbreviation and name.
pub fn render_teams<W: Write>(out: &mut W, teams: &[&Team], use_color: bool) -> std::io::Result<()> {
    let header = format!("{}{}{}{}\n", pad("Id", 5), pad("Slug", 14), pad("Abbr", 6), "Name");
    write_colored(out, &header, header_fg(), use_color)?;
    for team in teams {
        writeln!(
            out,
            "{}{}{}{}",
            pad(&team.id, 5),
            pad(&team.slug(), 14),
            pad(&team.abbreviation, 6),
            team.display_name
        )?;
    }
    out.flush()
}

#[derive(Serialize)]
struct RowView<'a> {
    #[serde(flatten)]
    row: &'a LinkedGameRow,
    flu: Option<bool>,
}

#[derive(Serialize)]
struct ReportView<'a> {
    team: &'a Team,
    query: &'a FluQuery,
    summary: FluSummary,
    seasons: &'a BTreeMap<i32, FluSummary>,
    rows: Vec<RowView<'a>>,
}

/// Pretty JSON with the rows in computation order, each carrying its verdict.
pub fn report_json(
    team: &Team,
    query: &FluQuery,
    rows: &[LinkedGameRow],
    summary: FluSummary,
    seasons: &BTreeMap<i32, FluSummary>,
) -> Result<String, AppError> {
    let view = ReportView {
        team,
        query,
        summary,
        seasons,
        rows: rows.iter().map(|row| RowView { row, flu: row.flu() }).collect(),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn standings_json(query: &FluQuery, standings: &[TeamStanding]) -> Result<String, AppError> {
    #[derive(Serialize)]
    struct StandingsView<'a> {
        seasons: &'a [i32],
        play_mode: crate::flu::PlayMode,
        follow_mode: FollowMode,
        standings: &'a [TeamStanding],
    }
    let view = StandingsView {
        seasons: &query.seasons,
        play_mode: query.play_mode,
        follow_mode: query.follow_mode,
        standings,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}
