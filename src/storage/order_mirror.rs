//! The local mirror of the customer's orders (`userOrders`).
//!
//! Implements [`EntityStore<Order>`], so the tracker actor keeps its orders here instead
//! of in memory. Each call is a full read-modify-write of the list.

use super::error::StorageError;
use super::local::LocalStorage;
use crate::framework::EntityStore;
use crate::model::{Order, OrderId};

/// Storage key of the mirrored order list.
pub const USER_ORDERS_KEY: &str = "userOrders";

#[derive(Debug, Clone)]
pub struct StoredOrderMirror {
    storage: LocalStorage,
}

impl StoredOrderMirror {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    fn edit<R>(&self, edit: impl FnOnce(&mut Vec<Order>) -> R) -> Result<R, StorageError> {
        self.storage
            .modify::<Vec<Order>, _>(USER_ORDERS_KEY, |list| edit(list.get_or_insert_with(Vec::new)))
    }
}

impl EntityStore<Order> for StoredOrderMirror {
    type Error = StorageError;

    fn get(&self, id: &OrderId) -> Result<Option<Order>, StorageError> {
        Ok(self.list()?.into_iter().find(|o| o.id == *id))
    }

    fn list(&self) -> Result<Vec<Order>, StorageError> {
        Ok(self
            .storage
            .get::<Vec<Order>>(USER_ORDERS_KEY)?
            .unwrap_or_default())
    }

    fn append(&mut self, id: OrderId, order: Order) -> Result<bool, StorageError> {
        self.edit(|orders| {
            if orders.iter().any(|o| o.id == id) {
                return false;
            }
            orders.push(order);
            true
        })
    }

    fn update(&mut self, id: &OrderId, order: Order) -> Result<bool, StorageError> {
        self.edit(|orders| match orders.iter_mut().find(|o| o.id == *id) {
            Some(slot) => {
                *slot = order;
                true
            }
            None => false,
        })
    }

    fn remove(&mut self, id: &OrderId) -> Result<bool, StorageError> {
        self.edit(|orders| {
            let before = orders.len();
            orders.retain(|o| o.id != *id);
            orders.len() != before
        })
    }

    fn clear(&mut self) -> Result<usize, StorageError> {
        let dropped = self.count()?;
        self.storage.remove(USER_ORDERS_KEY)?;
        Ok(dropped)
    }

    fn count(&self) -> Result<usize, StorageError> {
        Ok(self.list()?.len())
    }
}
