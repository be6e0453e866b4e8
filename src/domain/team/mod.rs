// Team domain module
// Contains the team record, its populated view, and value objects

#![allow(clippy::module_inception)]

pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use team::{NewTeam, Team, TeamPatch, TeamWithPlayers};
pub use value_objects::Achievements;
