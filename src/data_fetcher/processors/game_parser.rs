use serde_json::Value;
use tracing::debug;

use super::timestamps::parse_timestamp;
use crate::data_fetcher::models::espn::{EspnCompetitor, EspnEvent};
use crate::data_fetcher::models::{GameRecord, GameResult, SeasonType};

/// Normalizes one raw schedule event into a [`GameRecord`] seen from `team_id`.
///
/// Returns `None` for events that cannot be attributed: no competition,
/// fewer than two competitors, no competitor matching `team_id`, no other
/// competitor, or a season type other than regular season / postseason.
/// `fallback_season` is used when the event carries no season year.
pub fn parse_event(team_id: &str, fallback_season: i32, event: EspnEvent) -> Option<GameRecord> {
    let competition = event.competitions.into_iter().next()?;
    if competition.competitors.len() < 2 {
        return None;
    }

    let completed = competition
        .status
        .as_ref()
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.completed)
        .unwrap_or(false);

    let mut team_side: Option<EspnCompetitor> = None;
    let mut opponent_side: Option<EspnCompetitor> = None;
    for competitor in competition.competitors {
        let is_team = competitor
            .team
            .as_ref()
            .and_then(|t| t.id.as_deref())
            .is_some_and(|id| id == team_id);
        if is_team {
            team_side = Some(competitor);
        } else {
            opponent_side = Some(competitor);
        }
    }
    let (team_side, opponent_side) = (team_side?, opponent_side?);

    let season_type = event
        .season_type
        .as_ref()
        .and_then(|t| t.code)
        .or_else(|| event.season.as_ref().and_then(|s| s.season_type))
        .and_then(SeasonType::from_code)?;
    let season = event
        .season
        .as_ref()
        .and_then(|s| s.year)
        .unwrap_or(fallback_season);

    let team_score = team_side.score.as_ref().and_then(|s| s.points());
    let opponent_score = opponent_side.score.as_ref().and_then(|s| s.points());
    let result = if completed {
        derive_result(&team_side, &opponent_side, team_score, opponent_score)
    } else {
        None
    };

    let (week, week_label) = match event.week {
        Some(week) => (week.number, week.text),
        None => (None, None),
    };

    let opponent_team = opponent_side.team.unwrap_or_default();
    Some(GameRecord {
        event_id: event.id.unwrap_or_default(),
        date: event.date.unwrap_or_default(),
        completed,
        season,
        season_type,
        week: week.filter(|_| season_type == SeasonType::Regular),
        week_label,
        is_home: team_side.home_away.as_deref() == Some("home"),
        team_id: team_id.to_string(),
        team_score,
        opponent_id: opponent_team.id.unwrap_or_default(),
        opponent_name: opponent_team.display_name.unwrap_or_default(),
        opponent_score,
        result,
    })
}

/// Explicit winner flags win over the scoreboard; the scoreboard is only
/// consulted when neither side is flagged.
fn derive_result(
    team_side: &EspnCompetitor,
    opponent_side: &EspnCompetitor,
    team_score: Option<i32>,
    opponent_score: Option<i32>,
) -> Option<GameResult> {
    if team_side.winner == Some(true) {
        return Some(GameResult::Win);
    }
    if opponent_side.winner == Some(true) {
        return Some(GameResult::Loss);
    }
    match (team_score, opponent_score) {
        (Some(team), Some(opponent)) => Some(GameResult::from_scores(team, opponent)),
        _ => None,
    }
}

/// Parses every raw event of one schedule partition, silently dropping the
/// ones that fail to deserialize or cannot be attributed to `team_id`.
pub fn parse_schedule_events(team_id: &str, season: i32, events: Vec<Value>) -> Vec<GameRecord> {
    let total = events.len();
    let games: Vec<GameRecord> = events
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<EspnEvent>(raw) {
            Ok(event) => parse_event(team_id, season, event),
            Err(e) => {
                debug!("Dropping undecodable event for team {team_id}: {e}");
                None
            }
        })
        .collect();

    if games.len() < total {
        debug!(
            "Dropped {} of {} events for team {} season {}",
            total - games.len(),
            total,
            team_id,
            season
        );
    }
    games
}

/// Orders games by kickoff. Games with unusable dates go last; ties keep
/// their incoming order.
pub fn sort_by_kickoff(games: &mut [GameRecord]) {
    games.sort_by_key(|game| {
        let ts = parse_timestamp(&game.date);
        (ts.is_none(), ts)
    });
}
