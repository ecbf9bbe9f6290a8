//! Error types for the Rider actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiderError {
    #[error("Rider not found: {0}")]
    NotFound(String),

    #[error("Rider {0} must not be empty")]
    MissingField(&'static str),

    #[error("Invalid bag volume: {0}")]
    InvalidBagVolume(f64),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for RiderError {
    fn from(msg: String) -> Self {
        RiderError::ActorCommunicationError(msg)
    }
}
