use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{PlayerRole, PlayerStats};
use crate::domain::team::Team;

/// Stored player record; `team` holds the identity of the player's team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PlayerRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlayerStats>,
}

/// Player returned by lookups, with the team reference populated.
/// `team` is `None` when the referenced team has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWithTeam {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PlayerRole>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlayerStats>,
}

/// A validated player bound to an already-resolved team
#[derive(Debug, Clone, Serialize)]
pub struct NewPlayer {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<PlayerRole>,
    team: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<PlayerStats>,
}

impl NewPlayer {
    /// Validates and builds a new player
    ///
    /// # Returns
    /// * `Err(String)` - If the name is blank
    pub fn new(
        name: impl Into<String>,
        role: Option<PlayerRole>,
        team: Uuid,
        stats: Option<PlayerStats>,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Player name cannot be empty".to_string());
        }

        Ok(Self {
            name,
            role,
            team,
            stats,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Uuid {
        self.team
    }
}

/// Partial player update
///
/// `team` is a team NAME, resolved by the repository the same way player
/// creation resolves it. It is never written to the store as given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<PlayerRole>,
    #[serde(default, skip_serializing)]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlayerStats>,
}

impl PlayerPatch {
    pub fn validate(&self) -> Result<(), String> {
        match &self.name {
            Some(name) if name.trim().is_empty() => {
                Err("Player name cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_player_stores_team_identity() {
        let team_id = Uuid::new_v4();
        let player = NewPlayer::new("Ravi", Some(PlayerRole::Bowler), team_id, None).unwrap();

        assert_eq!(
            serde_json::to_value(&player).unwrap(),
            json!({"name": "Ravi", "role": "Bowler", "team": team_id})
        );
    }

    #[test]
    fn blank_player_name_is_rejected() {
        assert!(NewPlayer::new(" ", None, Uuid::new_v4(), None).is_err());
    }

    #[test]
    fn patch_keeps_team_name_out_of_stored_fields() {
        let patch: PlayerPatch =
            serde_json::from_value(json!({"team": "Lions", "role": "Batsman"})).unwrap();

        assert_eq!(patch.team.as_deref(), Some("Lions"));
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"role": "Batsman"}));
    }

    #[test]
    fn populated_player_with_deleted_team() {
        let player: PlayerWithTeam = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "name": "Ravi",
            "team": null
        }))
        .unwrap();

        assert!(player.team.is_none());
    }
}
