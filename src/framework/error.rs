//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself, as opposed to the domain errors each
//! entity defines. Clients map these into their own error enums at the boundary.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Store error: {0}")]
    StoreError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the actor answered that the requested id is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FrameworkError::NotFound(_))
    }
}
