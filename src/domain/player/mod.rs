// Player domain module

#![allow(clippy::module_inception)]

pub mod player;
pub mod value_objects;

pub use player::{NewPlayer, Player, PlayerPatch, PlayerWithTeam};
pub use value_objects::{PlayerRole, PlayerStats};
