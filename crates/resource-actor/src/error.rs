//! # Framework Errors
//!
//! Failures of the actor plumbing itself, as opposed to the domain errors each entity
//! defines. Entity errors travel inside [`FrameworkError::EntityError`] so that the
//! resource-specific client can surface the original message.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Returns true when the request reached the actor but the id was unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FrameworkError::NotFound(_))
    }
}
