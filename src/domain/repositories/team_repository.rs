use uuid::Uuid;

use super::errors::{RepositoryError, RepositoryResult};
use crate::domain::store::{
    from_document, to_document, Collection, Filter, Reference, SharedStore, StoreResult, Update,
    ID_FIELD,
};
use crate::domain::team::{NewTeam, Team, TeamPatch, TeamWithPlayers};

const PLAYERS_FIELD: &str = "players";

/// Team records addressed by name
///
/// Owns the `players` back-reference list; only the player repository
/// appends to or removes from it.
#[derive(Clone)]
pub struct TeamRepository {
    store: SharedStore,
}

impl TeamRepository {
    /// Creates a new TeamRepository
    ///
    /// # Arguments
    /// * `store` - Entity Store shared with the other repositories
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Store a new team. A name already in use fails with a duplicate key error
    /// and leaves the existing team untouched.
    pub async fn create(&self, team: NewTeam) -> RepositoryResult<Team> {
        let stored = self
            .store
            .insert(Collection::Teams, to_document(&team)?)
            .await?;
        let team: Team = from_document(stored)?;

        tracing::info!(team_id = %team.id, name = %team.name, "Team created");
        Ok(team)
    }

    /// Raw lookup by name, without populating players
    pub async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Team>> {
        let found = self
            .store
            .find_one(Collection::Teams, &Filter::eq("name", name))
            .await?;

        Ok(found.map(from_document::<Team>).transpose()?)
    }

    /// Every team whose name is one of `names`, in one store round trip
    pub async fn find_by_names(&self, names: &[String]) -> RepositoryResult<Vec<Team>> {
        let found = self
            .store
            .find_many(Collection::Teams, &Filter::is_in("name", names.iter().cloned()))
            .await?;

        Ok(found
            .into_iter()
            .map(from_document)
            .collect::<StoreResult<Vec<Team>>>()?)
    }

    /// Look a team up by name with its players populated
    pub async fn get_by_name(&self, name: &str) -> RepositoryResult<TeamWithPlayers> {
        let document = self
            .store
            .find_one(Collection::Teams, &Filter::eq("name", name))
            .await?
            .ok_or_else(|| RepositoryError::team_not_found(name))?;

        let populated = self
            .store
            .resolve_references(
                document,
                &[Reference::new(PLAYERS_FIELD, Collection::Players)],
            )
            .await?;

        Ok(from_document(populated)?)
    }

    /// Apply a partial update and return the team as stored afterwards
    pub async fn update_by_name(&self, name: &str, patch: TeamPatch) -> RepositoryResult<Team> {
        patch.validate().map_err(RepositoryError::Validation)?;

        let updated = self
            .store
            .update_one(
                Collection::Teams,
                &Filter::eq("name", name),
                &Update::Set(to_document(&patch)?),
            )
            .await?
            .ok_or_else(|| RepositoryError::team_not_found(name))?;

        Ok(from_document(updated)?)
    }

    /// Remove a team. Players and matches pointing at it keep their references.
    pub async fn delete_by_name(&self, name: &str) -> RepositoryResult<Team> {
        let deleted = self
            .store
            .delete_one(Collection::Teams, &Filter::eq("name", name))
            .await?
            .ok_or_else(|| RepositoryError::team_not_found(name))?;
        let team: Team = from_document(deleted)?;

        tracing::info!(
            team_id = %team.id,
            name = %team.name,
            dangling_players = team.players.len(),
            "Team deleted"
        );
        Ok(team)
    }

    /// Append a player to the team's back-reference list.
    /// No duplicate check; returns `None` if the team no longer exists.
    pub(crate) async fn append_player(
        &self,
        team_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Team>> {
        let updated = self
            .store
            .update_one(
                Collection::Teams,
                &Filter::eq(ID_FIELD, team_id.to_string()),
                &Update::push(PLAYERS_FIELD, player_id.to_string()),
            )
            .await?;

        updated.map(from_document).transpose()
    }

    /// Drop a player from the team's back-reference list
    pub(crate) async fn remove_player(
        &self,
        team_id: Uuid,
        player_id: Uuid,
    ) -> StoreResult<Option<Team>> {
        let updated = self
            .store
            .update_one(
                Collection::Teams,
                &Filter::eq(ID_FIELD, team_id.to_string()),
                &Update::pull(PLAYERS_FIELD, player_id.to_string()),
            )
            .await?;

        updated.map(from_document).transpose()
    }
}
