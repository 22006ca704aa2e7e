//! Raw ESPN site API payloads.
//!
//! The site API is loosely typed: numbers arrive as strings, scores as
//! strings, numbers or objects. Every field is optional here so a single odd
//! event never fails a whole schedule response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Team schedule response. Events are kept as raw JSON so each one can be
/// deserialized (and dropped on failure) individually.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub events: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnEvent {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub season: Option<EspnSeason>,
    #[serde(rename = "seasonType", default)]
    pub season_type: Option<EspnSeasonType>,
    #[serde(default)]
    pub week: Option<EspnWeek>,
    #[serde(default)]
    pub competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnSeason {
    #[serde(default, deserialize_with = "lenient::int")]
    pub year: Option<i32>,
    #[serde(rename = "type", default, deserialize_with = "lenient::int")]
    pub season_type: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnSeasonType {
    #[serde(rename = "type", default, deserialize_with = "lenient::int")]
    pub code: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnWeek {
    #[serde(default, deserialize_with = "lenient::int")]
    pub number: Option<i32>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnCompetition {
    #[serde(default)]
    pub competitors: Vec<EspnCompetitor>,
    #[serde(default)]
    pub status: Option<EspnStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnStatus {
    #[serde(rename = "type", default)]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnStatusType {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnCompetitor {
    #[serde(default)]
    pub team: Option<EspnTeamRef>,
    #[serde(rename = "homeAway", default)]
    pub home_away: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub winner: Option<bool>,
    #[serde(default)]
    pub score: Option<EspnScore>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnTeamRef {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Score variants seen on the site API: `"34"`, `34`, `34.0` or
/// `{"value": 34.0, "displayValue": "34"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EspnScore {
    Number(f64),
    Text(String),
    Detailed {
        #[serde(default)]
        value: Option<f64>,
        #[serde(rename = "displayValue", default)]
        display_value: Option<String>,
    },
    Other(Value),
}

impl EspnScore {
    pub fn points(&self) -> Option<i32> {
        match self {
            EspnScore::Number(n) => float_points(*n),
            EspnScore::Text(s) => s.trim().parse::<i32>().ok(),
            EspnScore::Detailed {
                value,
                display_value,
            } => match value {
                Some(v) => float_points(*v),
                None => display_value
                    .as_deref()
                    .and_then(|s| s.trim().parse::<i32>().ok()),
            },
            EspnScore::Other(_) => None,
        }
    }
}

fn float_points(value: f64) -> Option<i32> {
    if value.is_finite() {
        Some(value.trunc() as i32)
    } else {
        None
    }
}

/// Team directory response: `sports[].leagues[].teams[].team`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub sports: Vec<EspnSport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnSport {
    #[serde(default)]
    pub leagues: Vec<EspnLeague>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnLeague {
    #[serde(default)]
    pub teams: Vec<EspnTeamEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnTeamEntry {
    #[serde(default)]
    pub team: Option<EspnTeam>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EspnTeam {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Deserializers that accept whatever shape the site API happens to send
/// and yield `None` instead of failing.
mod lenient {
    use super::*;

    pub fn int<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().and_then(coerce_int))
    }

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Bool(b)) => Some(b),
            _ => None,
        })
    }

    fn coerce_int(value: &Value) -> Option<i32> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .and_then(|i| i32::try_from(i).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
    }
}
