use serde::{Deserialize, Serialize};

/// Playing role of a cricketer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    #[serde(rename = "All-Rounder")]
    AllRounder,
    #[serde(rename = "Wicket-Keeper")]
    WicketKeeper,
}

impl std::fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerRole::Batsman => write!(f, "Batsman"),
            PlayerRole::Bowler => write!(f, "Bowler"),
            PlayerRole::AllRounder => write!(f, "All-Rounder"),
            PlayerRole::WicketKeeper => write!(f, "Wicket-Keeper"),
        }
    }
}

/// Career numbers for a player. Every field is optional and unchecked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wickets: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strike_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hyphenated_roles_round_trip() {
        assert_eq!(
            serde_json::to_value(PlayerRole::AllRounder).unwrap(),
            json!("All-Rounder")
        );
        let keeper: PlayerRole = serde_json::from_value(json!("Wicket-Keeper")).unwrap();
        assert_eq!(keeper, PlayerRole::WicketKeeper);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(serde_json::from_value::<PlayerRole>(json!("Captain")).is_err());
    }

    #[test]
    fn role_display_matches_wire_name() {
        assert_eq!(PlayerRole::Batsman.to_string(), "Batsman");
        assert_eq!(PlayerRole::WicketKeeper.to_string(), "Wicket-Keeper");
    }

    #[test]
    fn stats_use_camel_case_keys() {
        let stats: PlayerStats =
            serde_json::from_value(json!({"runs": 4200, "strikeRate": 134.5})).unwrap();

        assert_eq!(stats.runs, Some(4200.0));
        assert_eq!(stats.strike_rate, Some(134.5));
        assert_eq!(stats.wickets, None);
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            json!({"runs": 4200.0, "strikeRate": 134.5})
        );
    }

    #[test]
    fn stats_accept_any_number() {
        let stats: PlayerStats =
            serde_json::from_value(json!({"runs": -5, "matches": 1.5, "catches": 12})).unwrap();

        assert_eq!(stats.runs, Some(-5.0));
        assert_eq!(stats.matches, Some(1.5));
        assert_eq!(stats.catches, Some(12.0));
    }
}
