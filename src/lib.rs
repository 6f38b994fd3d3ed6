//! # Pizzeria Storefront
//!
//! > **The ordering core of a pizzeria website, as resource-oriented actors.**
//!
//! A customer browses the menu, fills a cart, checks out with card, cash, PIX or a
//! wallet, and follows the order until it is delivered. The two pieces of state the
//! storefront owns, the cart and the customer's mirrored orders, each live inside a
//! `ResourceActor`, so concurrent UI handlers never race on them.
//!
//! ## 🏗️ Design
//!
//! ### Cart as a reducer
//! [`CartState::apply`](model::CartState::apply) is a pure function from state and
//! [`CartAction`](model::CartAction) to the next state. The cart actor is the only
//! caller; it announces additions after the reducer has run. The total always equals
//! the sum of the lines.
//!
//! ### Order lifecycle
//! `payment_pending → pending → in_transit → completed | canceled`. The tracker actor
//! serialises every transition, persists it to local storage and owns the cancellable
//! delivery timer that completes an order left in transit.
//!
//! ### Collaborators behind traits
//! The backend ([`backend::Backend`]), payment methods ([`payment::PaymentProcessor`])
//! and notifications ([`notify::Notifier`]) are traits with in-process implementations,
//! so the whole flow runs and is tested without a server.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T, S>` and its client, store and mock.
//! - **Key items**: [`ActorEntity`](framework::ActorEntity), [`ResourceActor`](framework::ResourceActor),
//!   [`EntityStore`](framework::EntityStore).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! Config, tracing setup, and the system that spawns and stops every actor.
//! - **Key items**: [`StorefrontSystem`](lifecycle::StorefrontSystem), [`StorefrontConfig`](lifecycle::StorefrontConfig).
//!
//! ### 3. The Interface ([`clients`], [`checkout`])
//! - [`CartClient`](clients::CartClient), [`TrackerClient`](clients::TrackerClient)
//! - [`CheckoutService`](checkout::CheckoutService) turns a cart into a placed, paid order.
//!
//! ### 4. The Implementation ([`cart_actor`], [`tracker_actor`], [`backend`])
//! Concrete `ActorEntity` implementations.
//!
//! ### 5. Data and Collaborators ([`model`], [`storage`], [`payment`], [`notify`])
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod backend;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod payment;
pub mod storage;
pub mod tracker_actor;
