//! # System Lifecycle
//!
//! Builds the storefront from a [`StorefrontConfig`], spawns its actors with their
//! contexts, and stops them again.
//!
//! Actors are created first and handed their dependencies at `run()`. The tracker
//! needs this: its delivery timers hold a weak client to the tracker itself, which only
//! exists once the actor is built.
//!
//! ## Shutdown
//!
//! [`StorefrontSystem::shutdown`] drops every client. The actors' channels close, each
//! loop finishes the messages already queued and exits, and `shutdown` awaits the tasks.
//! Delivery timers don't keep the tracker alive; they are aborted with it.

pub mod config;
pub mod storefront_system;
pub mod tracing;

pub use config::{ConfigError, StorefrontConfig};
pub use storefront_system::StorefrontSystem;
pub use self::tracing::setup_tracing;
