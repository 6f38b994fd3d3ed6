//! # ActorEntity Trait
//!
//! The contract every resource managed by a [`ResourceActor`](crate::framework::ResourceActor)
//! implements: carts, mirrored orders and the in-process backend records all go through it.
//!
//! Associated types keep the payloads apart. A `Cart` only accepts `CartAction`s and an
//! `Order` only accepts `TrackerAction`s, so a message meant for one actor can't be sent
//! to another.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::assign_id`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::on_clear`]
//! - [`ActorEntity::after_action`]
//!
//! Override them only when the default (sequence id, no-op hooks) doesn't fit.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can talk to other actors or collaborators.
/// The `Context` type is injected into every hook by `run()`, which lets dependencies
/// be bound after the actor and its client exist (the tracker hands its own weak client
/// to the delivery timers this way).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    /// Use `Infallible` when the entity only changes through actions.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `AddPizza`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity. One enum per actor, shared by every hook.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Picks the id of a new entity.
    ///
    /// The default takes the actor's running sequence. Entities whose identity is
    /// assigned elsewhere (orders numbered by the backend) read it from `params`.
    fn assign_id(_params: &Self::Create, next: u32) -> Self::Id {
        Self::Id::from(next)
    }

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once the whole store has been cleared.
    async fn on_clear(_ctx: &Self::Context) {}

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Called after the entity changed by an action has been written back, with the
    /// stored state from before the action. Not called when the write fails.
    /// Notifications and timers that must follow a persisted change go here.
    async fn after_action(&self, _previous: &Self, _ctx: &Self::Context) {}
}
