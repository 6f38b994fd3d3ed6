//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Callers use these instead of raw messages: [`CartClient`] for the shopping cart,
//! [`TrackerClient`] for order status.

pub mod cart_client;
pub mod tracker_client;

pub use cart_client::*;
pub use tracker_client::*;
