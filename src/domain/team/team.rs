use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::Achievements;
use crate::domain::player::Player;

/// Stored team record
///
/// `players` is a denormalized list of the players whose `team` points back
/// at this record. The player repository keeps it in step; the store does
/// not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach: Option<String>,
    #[serde(default)]
    pub players: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Achievements>,
}

/// Team returned by lookups, with its player references populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWithPlayers {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach: Option<String>,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Achievements>,
}

/// A validated team waiting to be stored
///
/// # Invariants
/// - Name is not blank
/// - Starts with no players; players join through player creation
///
/// # Example
/// ```
/// use cricket_league_api::domain::team::NewTeam;
///
/// let team = NewTeam::new("Tigers", Some("R. Kumar".to_string()), None).expect("valid team");
/// assert_eq!(team.name(), "Tigers");
/// assert!(NewTeam::new("  ", None, None).is_err());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct NewTeam {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coach: Option<String>,
    players: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    achievements: Option<Achievements>,
}

impl NewTeam {
    /// Validates and builds a new team
    ///
    /// # Returns
    /// * `Ok(NewTeam)` - Ready to insert
    /// * `Err(String)` - If the name is blank
    pub fn new(
        name: impl Into<String>,
        coach: Option<String>,
        achievements: Option<Achievements>,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Team name cannot be empty".to_string());
        }

        Ok(Self {
            name,
            coach,
            players: Vec::new(),
            achievements,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Partial team update
///
/// The player list is not part of the patch; it only changes through the
/// player repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Achievements>,
}

impl TeamPatch {
    /// Rejects a rename to a blank name
    pub fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err("Team name cannot be empty".to_string()),
            _ => Ok(()),
        }
    }
}
