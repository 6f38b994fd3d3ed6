//! Error types for the order tracker.

use crate::model::OrderId;
use thiserror::Error;

/// Errors that can occur while tracking orders.
///
/// An order missing from the mirror is not an error: tracker operations answer
/// `Ok(None)` for it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    /// `track_new` was called twice for the same order.
    #[error("Order already tracked: {0}")]
    AlreadyTracked(OrderId),

    /// The order mirror could not be read or written.
    #[error("Order mirror error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
