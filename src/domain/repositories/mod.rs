// Repositories over the Entity Store
// Each one is built around an injected store handle

pub mod errors;
pub mod match_repository;
pub mod player_repository;
pub mod team_repository;

pub use errors::{RepositoryError, RepositoryResult};
pub use match_repository::MatchRepository;
pub use player_repository::PlayerRepository;
pub use team_repository::TeamRepository;
