//! Error types for the Cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// Cart mutations themselves never fail (bad indices are ignored by the reducer), so
/// everything here is about reaching the cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// No cart is open under this id.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
