//! Generic actor framework for resource management.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns an [`EntityStore`] of entities
//! - [`ResourceClient`] - Type-safe handle for sending requests to an actor
//! - [`ActorClient`] - Shared read operations for domain clients
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::{ResourceClient, WeakResourceClient};
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use store::{EntityStore, MemoryStore};
