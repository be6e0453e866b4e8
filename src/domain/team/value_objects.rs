use serde::{Deserialize, Serialize};

/// Honours a team lists, either as one free-text line or as separate entries
///
/// # Example
/// ```
/// use cricket_league_api::domain::team::Achievements;
///
/// let single: Achievements = serde_json::from_str(r#""Champions 2023""#).unwrap();
/// assert_eq!(single.entries(), vec!["Champions 2023"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Achievements {
    /// A single free-text description
    Summary(String),
    /// One entry per honour
    List(Vec<String>),
}

impl Achievements {
    /// Returns every achievement as its own entry
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Achievements::Summary(text) => vec![text.as_str()],
            Achievements::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}
