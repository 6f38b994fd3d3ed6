//! # Cart Actor
//!
//! Owns the shopping carts of every open session. UI code never touches a
//! [`CartState`](crate::model::CartState) directly: it holds a
//! [`CartClient`](crate::clients::CartClient) and every change is a
//! [`CartAction`](crate::model::CartAction) message, so two handlers racing on the same
//! cart are applied one after the other.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Cart`]
//! - [`error`] - [`CartError`]
//!
//! ```rust
//! use pizzeria_storefront::cart_actor;
//! use pizzeria_storefront::clients::CartClient;
//! use pizzeria_storefront::model::{Beverage, BeverageId};
//! use pizzeria_storefront::notify::{Notifier, TracingNotifier};
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = cart_actor::new(32);
//!     let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
//!     tokio::spawn(actor.run(notifier));
//!
//!     let carts = CartClient::new(generic_client);
//!     let cart = carts.open_cart("web-1").await?;
//!     let coke = Beverage::new(BeverageId(1), "Coke", Decimal::new(500, 2));
//!     let state = carts.add_beverage(cart, coke).await?;
//!     assert_eq!(state.total_price(), Decimal::new(500, 2));
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Cart;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, ResourceClient<Cart>) {
    ResourceActor::new(buffer_size)
}
