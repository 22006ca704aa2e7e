use serde::{Deserialize, Serialize};

use super::espn::{EspnTeam, TeamsResponse};
use crate::error::AppError;

/// A league team as listed by the team directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub display_name: String,
    pub abbreviation: String,
    pub nickname: String,
    /// Primary color as hex without the leading `#`
    pub color: Option<String>,
}

impl Team {
    /// Lowercased nickname used in URLs and on the command line (`lions`).
    pub fn slug(&self) -> String {
        self.nickname.to_lowercase()
    }

    fn from_espn(team: EspnTeam) -> Option<Self> {
        let id = team.id.filter(|id| !id.is_empty())?;
        let display_name = team.display_name.unwrap_or_default();
        Some(Team {
            nickname: team.nickname.unwrap_or_else(|| display_name.clone()),
            abbreviation: team.abbreviation.unwrap_or_default(),
            display_name,
            color: team.color,
            id,
        })
    }
}

/// Id/name lookup table over the league's teams.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamDirectory {
    teams: Vec<Team>,
}

impl TeamDirectory {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Flattens the nested directory payload, skipping entries without an id.
    pub fn from_response(response: TeamsResponse) -> Self {
        let teams = response
            .sports
            .into_iter()
            .take(1)
            .flat_map(|sport| sport.leagues.into_iter().take(1))
            .flat_map(|league| league.teams)
            .filter_map(|entry| entry.team)
            .filter_map(Team::from_espn)
            .collect();
        Self { teams }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Display name for an id, falling back to the id itself.
    pub fn name_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.by_id(id).map(|t| t.display_name.as_str()).unwrap_or(id)
    }

    /// Resolves a user-supplied team reference: id, nickname slug,
    /// abbreviation or full display name (case-insensitive).
    pub fn resolve(&self, query: &str) -> Result<&Team, AppError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Err(AppError::team_not_found(query));
        }
        self.by_id(needle)
            .or_else(|| {
                self.teams.iter().find(|t| {
                    t.nickname.eq_ignore_ascii_case(needle)
                        || t.abbreviation.eq_ignore_ascii_case(needle)
                        || t.display_name.eq_ignore_ascii_case(needle)
                })
            })
            .ok_or_else(|| AppError::team_not_found(query))
    }

    /// Teams ordered by display name, as shown in pickers and listings.
    pub fn sorted_by_name(&self) -> Vec<&Team> {
        let mut teams: Vec<&Team> = self.teams.iter().collect();
        teams.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        teams
    }
}
