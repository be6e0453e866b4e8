// Infrastructure layer module
// Contains Entity Store adapters
// Follows Hexagonal Architecture

pub mod store;
