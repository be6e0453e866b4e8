use uuid::Uuid;

use super::errors::{RepositoryError, RepositoryResult};
use super::team_repository::TeamRepository;
use crate::domain::player::{NewPlayer, Player, PlayerPatch, PlayerRole, PlayerStats, PlayerWithTeam};
use crate::domain::store::{
    from_document, to_document, Collection, Filter, Reference, SharedStore, StoreError, Update,
    ID_FIELD,
};
use crate::domain::team::Team;

/// Player records addressed by name
///
/// Creating a player writes twice: the player document, then the team's
/// `players` list. The second write is not transactional with the first; if
/// it fails the player stays stored without being listed on its team, and
/// the failure is logged with `orphaned_player = true` for manual repair.
#[derive(Clone)]
pub struct PlayerRepository {
    store: SharedStore,
    teams: TeamRepository,
}

impl PlayerRepository {
    /// Creates a new PlayerRepository
    pub fn new(store: SharedStore) -> Self {
        Self {
            teams: TeamRepository::new(store.clone()),
            store,
        }
    }

    /// Create a player on the team called `team_name`
    ///
    /// # Returns
    /// * `Err(TeamNotFound)` - No team has that name; nothing is written
    /// * `Err(BackReference)` - The player was stored but the team's list
    ///   could not be updated
    pub async fn create(
        &self,
        name: impl Into<String>,
        role: Option<PlayerRole>,
        team_name: &str,
        stats: Option<PlayerStats>,
    ) -> RepositoryResult<Player> {
        let team = self.resolve_team(team_name).await?;
        let player = NewPlayer::new(name, role, team.id, stats).map_err(RepositoryError::Validation)?;

        let stored = self
            .store
            .insert(Collection::Players, to_document(&player)?)
            .await?;
        let player: Player = from_document(stored)?;

        self.link(player.id, team.id).await?;

        tracing::info!(
            player_id = %player.id,
            team_id = %team.id,
            name = %player.name,
            "Player created"
        );
        Ok(player)
    }

    /// Look a player up by name with the team populated
    pub async fn get_by_name(&self, name: &str) -> RepositoryResult<PlayerWithTeam> {
        let document = self
            .store
            .find_one(Collection::Players, &Filter::eq("name", name))
            .await?
            .ok_or_else(|| RepositoryError::player_not_found(name))?;

        let populated = self
            .store
            .resolve_references(document, &[Reference::new("team", Collection::Teams)])
            .await?;

        Ok(from_document(populated)?)
    }

    /// Apply a partial update
    ///
    /// A `team` in the patch is a team name and is resolved exactly as on
    /// create. When the team changes, the player moves from the old team's
    /// list to the new one's: appended to the new list first, then pulled
    /// from the old. Either step failing returns `BackReference` naming the
    /// team whose list is out of sync.
    pub async fn update_by_name(&self, name: &str, patch: PlayerPatch) -> RepositoryResult<Player> {
        patch.validate().map_err(RepositoryError::Validation)?;

        let current: Player = self
            .store
            .find_one(Collection::Players, &Filter::eq("name", name))
            .await?
            .map(from_document::<Player>)
            .transpose()?
            .ok_or_else(|| RepositoryError::player_not_found(name))?;

        let new_team = match patch.team.as_deref() {
            Some(team_name) => Some(self.resolve_team(team_name).await?),
            None => None,
        };

        let mut fields = to_document(&patch)?;
        if let Some(team) = &new_team {
            fields.insert("team".to_string(), team.id.to_string().into());
        }

        let updated: Player = self
            .store
            .update_one(
                Collection::Players,
                &Filter::eq(ID_FIELD, current.id.to_string()),
                &Update::Set(fields),
            )
            .await?
            .map(from_document::<Player>)
            .transpose()?
            .ok_or_else(|| RepositoryError::player_not_found(name))?;

        if let Some(team) = new_team {
            if current.team != Some(team.id) {
                self.link(current.id, team.id).await?;
                if let Some(previous) = current.team {
                    self.unlink(current.id, previous).await?;
                }

                tracing::info!(
                    player_id = %current.id,
                    from_team = ?current.team,
                    to_team = %team.id,
                    "Player moved to another team"
                );
            }
        }

        Ok(updated)
    }

    /// Remove a player. The team's `players` list keeps the stale identity.
    pub async fn delete_by_name(&self, name: &str) -> RepositoryResult<Player> {
        let deleted = self
            .store
            .delete_one(Collection::Players, &Filter::eq("name", name))
            .await?
            .ok_or_else(|| RepositoryError::player_not_found(name))?;
        let player: Player = from_document(deleted)?;

        tracing::info!(player_id = %player.id, name = %player.name, "Player deleted");
        Ok(player)
    }

    async fn resolve_team(&self, team_name: &str) -> RepositoryResult<Team> {
        self.teams.find_by_name(team_name).await?.ok_or_else(|| {
            tracing::warn!(team = %team_name, "Player references unknown team");
            RepositoryError::TeamNotFound(team_name.to_string())
        })
    }

    /// Second half of the dual write: list the player on its team
    async fn link(&self, player_id: Uuid, team_id: Uuid) -> RepositoryResult<()> {
        match self.teams.append_player(team_id, player_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(back_reference_failed(
                player_id,
                team_id,
                StoreError::Backend(format!("team {} no longer exists", team_id)),
            )),
            Err(e) => Err(back_reference_failed(player_id, team_id, e)),
        }
    }

    /// Drop the player from the team it left. A team that no longer exists
    /// has nothing to drop.
    async fn unlink(&self, player_id: Uuid, team_id: Uuid) -> RepositoryResult<()> {
        self.teams
            .remove_player(team_id, player_id)
            .await
            .map(|_| ())
            .map_err(|e| back_reference_failed(player_id, team_id, e))
    }
}

/// A player write went through but the team list at `team_id` did not follow
fn back_reference_failed(player_id: Uuid, team_id: Uuid, source: StoreError) -> RepositoryError {
    tracing::error!(
        player_id = %player_id,
        team_id = %team_id,
        orphaned_player = true,
        error = %source,
        "Player stored but team list out of sync; manual reconciliation required"
    );

    RepositoryError::BackReference {
        player_id,
        team_id,
        source,
    }
}
