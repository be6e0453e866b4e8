//! Cricket League API Library
//!
//! Record keeping for teams, players and matches. Records reference each
//! other by identity; the repositories keep those references consistent
//! while the HTTP layer addresses everything by name.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
