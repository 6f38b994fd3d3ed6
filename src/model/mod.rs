//! Plain data: catalog, carts, orders, customers and payments.
//!
//! The types that actors manage ([`Cart`], [`Order`]) implement
//! [`ActorEntity`](crate::framework::ActorEntity) in their actor modules, keeping this
//! layer free of messaging concerns.

pub mod cart;
pub mod catalog;
pub mod customer;
pub mod ids;
pub mod money;
pub mod order;
pub mod payment;

pub use cart::*;
pub use catalog::*;
pub use customer::*;
pub use ids::*;
pub use money::*;
pub use order::*;
pub use payment::*;
