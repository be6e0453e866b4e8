// HTTP handlers, one module per resource

pub mod health;
pub mod matches;
pub mod players;
pub mod teams;

use serde::Serialize;

/// Body returned by successful deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
