use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Disciplines queried when the caller does not ask for specific ones:
/// Snowboard, Freestyle, Cross-Country, Nordic Combined.
pub const DEFAULT_DISCIPLINES: [&str; 4] = ["SB", "FS", "CC", "NK"];

/// Role value marking a competitor row (as opposed to coaches, officials, ...)
pub const ATHLETE_FUNCTION: &str = "athlete";

/// FIS sends season codes either as a JSON number or a string.
/// Keeps the original shape so the record is re-emitted unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    Number(i64),
    Text(String),
}

impl Code {
    pub fn matches(&self, other: &str) -> bool {
        self.to_string().trim().eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Number(n) => write!(f, "{}", n),
            Code::Text(s) => f.write_str(s),
        }
    }
}

/// Competition a sanction belongs to. Fields we don't look at are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionSummary {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub discipline_code: Option<String>,
    #[serde(default)]
    pub season_code: Option<Code>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One sanction row as returned by `GET /sanctions/{discipline}/{season}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionRecord {
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub competition_summary: Option<CompetitionSummary>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SanctionRecord {
    pub fn is_athlete(&self) -> bool {
        self.function.as_deref() == Some(ATHLETE_FUNCTION)
    }

    pub fn discipline_code(&self) -> Option<&str> {
        self.competition_summary
            .as_ref()
            .and_then(|c| c.discipline_code.as_deref())
    }

    pub fn season_code(&self) -> Option<&Code> {
        self.competition_summary
            .as_ref()
            .and_then(|c| c.season_code.as_ref())
    }

    /// When the competition took place, used as the sort key.
    /// Timestamps with an offset are compared in UTC. A bare date counts as midnight.
    pub fn competition_date(&self) -> Option<NaiveDateTime> {
        let raw = self.competition_summary.as_ref()?.date.as_deref()?;
        parse_competition_date(raw)
    }

    /// Case-insensitive prefix match on first or last name.
    /// `prefix` must already be lowercase.
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .any(|name| name.trim().to_lowercase().starts_with(prefix))
    }
}

fn parse_competition_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at);
        }
    }

    // Day only, or a time part we can't read. chrono accepts "2024-2-5" here.
    let day = raw.split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
