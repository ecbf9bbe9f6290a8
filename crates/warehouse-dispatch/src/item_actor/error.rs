//! Error types for the Item actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Item name must not be empty")]
    EmptyName,

    /// Scanner readings must be finite and positive.
    #[error("Invalid scan: weight {weight} and volume {volume} must both be greater than zero")]
    InvalidScan { weight: f64, volume: f64 },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ItemError {
    fn from(msg: String) -> Self {
        ItemError::ActorCommunicationError(msg)
    }
}
