//! # Local Persistence
//!
//! One keyed JSON blob ([`LocalStorage`]) and the two repositories built on it:
//!
//! - [`StoredOrderMirror`] - the `userOrders` list, an
//!   [`EntityStore<Order>`](crate::framework::EntityStore) used by the tracker actor
//! - [`SavedUserStore`] - the `savedUser` profile
//!
//! Swapping the medium (memory, a JSON file) is a matter of which [`StorageLocation`]
//! the system is started with; tracker logic never sees the difference.

pub mod error;
pub mod local;
pub mod order_mirror;
pub mod saved_user;

pub use error::StorageError;
pub use local::{LocalStorage, StorageLocation};
pub use order_mirror::{StoredOrderMirror, USER_ORDERS_KEY};
pub use saved_user::{SavedUserStore, SAVED_USER_KEY};
