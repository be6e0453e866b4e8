use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::team::Team;

/// One innings line of a scorecard
///
/// `T` is what identifies the team: a name on input, an identity in
/// storage, a full team record once populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRow<T> {
    pub team: T,
    #[serde(default)]
    pub runs: f64,
    #[serde(default)]
    pub wickets_lost: f64,
    #[serde(default)]
    pub overs: f64,
}

impl<T> ScoreRow<T> {
    /// Keeps the numbers, swaps the team reference
    pub fn with_team<U>(self, team: U) -> ScoreRow<U> {
        ScoreRow {
            team,
            runs: self.runs,
            wickets_lost: self.wickets_lost,
            overs: self.overs,
        }
    }
}

/// Outcome of a match; `winner` follows the same convention as `ScoreRow::team`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult<T> {
    pub winner: T,
    #[serde(default)]
    pub margin: String,
}

/// Stored match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    pub teams: Vec<Uuid>,
    #[serde(default)]
    pub scores: Vec<ScoreRow<Uuid>>,
    pub result: MatchResult<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Match with every team reference populated
///
/// Teams deleted after the match was recorded drop out of `teams` and show
/// up as `None` in score rows and the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub id: Uuid,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub scores: Vec<ScoreRow<Option<Team>>>,
    pub result: MatchResult<Option<Team>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A match as submitted, with teams named rather than identified
///
/// # Invariants
/// - At least two participating teams
/// - No team named twice among the participants
///
/// # Example
/// ```
/// use cricket_league_api::domain::matches::{MatchResult, NewMatch};
///
/// let game = NewMatch::new(
///     vec!["Tigers".to_string(), "Lions".to_string()],
///     vec![],
///     MatchResult { winner: "Tigers".to_string(), margin: "30 runs".to_string() },
///     None,
///     None,
/// ).expect("valid match");
/// assert_eq!(game.teams().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    teams: Vec<String>,
    scores: Vec<ScoreRow<String>>,
    result: MatchResult<String>,
    date: Option<DateTime<Utc>>,
    location: Option<String>,
}

impl NewMatch {
    /// Validates participant names and builds a match awaiting resolution
    pub fn new(
        teams: Vec<String>,
        scores: Vec<ScoreRow<String>>,
        result: MatchResult<String>,
        date: Option<DateTime<Utc>>,
        location: Option<String>,
    ) -> Result<Self, String> {
        if teams.len() < 2 {
            return Err("A match needs at least two teams".to_string());
        }

        let mut seen = HashSet::new();
        for name in &teams {
            if name.trim().is_empty() {
                return Err("Team name cannot be empty".to_string());
            }
            if !seen.insert(name.as_str()) {
                return Err(format!("Team listed more than once: {}", name));
            }
        }

        Ok(Self {
            teams,
            scores,
            result,
            date,
            location,
        })
    }

    /// Participant names in submission order
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn scores(&self) -> &[ScoreRow<String>] {
        &self.scores
    }

    pub fn result(&self) -> &MatchResult<String> {
        &self.result
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
