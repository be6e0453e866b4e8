use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::errors::{RepositoryError, RepositoryResult};
use super::team_repository::TeamRepository;
use crate::domain::matches::{Match, MatchDetails, MatchResult, NewMatch, ScoreRow};
use crate::domain::store::{
    from_document, to_document, Collection, Filter, Reference, SharedStore, StoreResult,
};

/// Every place a match embeds a team identity
const TEAM_REFERENCES: [Reference; 3] = [
    Reference::new("teams", Collection::Teams),
    Reference::new("scores.team", Collection::Teams),
    Reference::new("result.winner", Collection::Teams),
];

/// Match document as written, with every team name already resolved
#[derive(Debug, Serialize)]
struct ResolvedMatch<'a> {
    teams: Vec<Uuid>,
    scores: Vec<ScoreRow<Uuid>>,
    result: MatchResult<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
}

/// Match records
///
/// Creation is validate-then-persist: every team name in the participant
/// list, the score rows and the result is resolved before anything is
/// written, so a rejected match leaves no trace in the store.
#[derive(Clone)]
pub struct MatchRepository {
    store: SharedStore,
    teams: TeamRepository,
}

impl MatchRepository {
    /// Creates a new MatchRepository
    pub fn new(store: SharedStore) -> Self {
        Self {
            teams: TeamRepository::new(store.clone()),
            store,
        }
    }

    /// Resolve the submitted team names and store the match
    ///
    /// # Returns
    /// * `Err(TeamsNotFound)` - A participant name matches no team
    /// * `Err(InvalidScoreTeam)` - A score row names a team not taking part
    /// * `Err(InvalidWinner)` - The winner is not taking part
    pub async fn create(&self, new_match: NewMatch) -> RepositoryResult<Match> {
        let resolved = self.teams.find_by_names(new_match.teams()).await?;
        let ids: HashMap<&str, Uuid> = resolved
            .iter()
            .map(|team| (team.name.as_str(), team.id))
            .collect();
        let lookup = |name: &str| ids.get(name).copied();

        // Participant names are distinct, so every one must map to a team
        let teams: Vec<Uuid> = new_match
            .teams()
            .iter()
            .filter_map(|name| lookup(name.as_str()))
            .collect();
        if teams.len() != new_match.teams().len() {
            tracing::warn!(
                requested = new_match.teams().len(),
                resolved = teams.len(),
                "Match names teams that do not exist"
            );
            return Err(RepositoryError::TeamsNotFound {
                requested: new_match.teams().len(),
                resolved: teams.len(),
            });
        }

        let scores = new_match
            .scores()
            .iter()
            .map(|row| {
                let id = lookup(row.team.as_str()).ok_or_else(|| {
                    tracing::warn!(team = %row.team, "Score row for a team not in the match");
                    RepositoryError::InvalidScoreTeam(row.team.clone())
                })?;
                Ok(row.clone().with_team(id))
            })
            .collect::<RepositoryResult<Vec<ScoreRow<Uuid>>>>()?;

        let winner_name = &new_match.result().winner;
        let winner = lookup(winner_name.as_str()).ok_or_else(|| {
            tracing::warn!(winner = %winner_name, "Winner is not playing in the match");
            RepositoryError::InvalidWinner(winner_name.clone())
        })?;

        tracing::debug!(teams = ?teams, "Resolved all match team references");

        let document = ResolvedMatch {
            teams,
            scores,
            result: MatchResult {
                winner,
                margin: new_match.result().margin.clone(),
            },
            date: new_match.date(),
            location: new_match.location(),
        };

        let stored = self
            .store
            .insert(Collection::Matches, to_document(&document)?)
            .await?;
        let stored: Match = from_document(stored)?;

        tracing::info!(match_id = %stored.id, "Match created");
        Ok(stored)
    }

    /// All matches with every team reference populated
    pub async fn list(&self) -> RepositoryResult<Vec<MatchDetails>> {
        let documents = self
            .store
            .find_many(Collection::Matches, &Filter::All)
            .await?;

        let mut matches = Vec::with_capacity(documents.len());
        for document in documents {
            let populated = self
                .store
                .resolve_references(document, &TEAM_REFERENCES)
                .await?;
            matches.push(populated);
        }

        Ok(matches
            .into_iter()
            .map(from_document)
            .collect::<StoreResult<Vec<MatchDetails>>>()?)
    }
}
