//! The customer profile remembered between checkouts (`savedUser`).

use super::error::StorageError;
use super::local::LocalStorage;
use crate::model::SavedUser;
use tracing::debug;

pub const SAVED_USER_KEY: &str = "savedUser";

#[derive(Debug, Clone)]
pub struct SavedUserStore {
    storage: LocalStorage,
}

impl SavedUserStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Result<Option<SavedUser>, StorageError> {
        self.storage.get(SAVED_USER_KEY)
    }

    pub fn save(&self, user: &SavedUser) -> Result<(), StorageError> {
        debug!(name = %user.full_name, "Saving customer profile");
        self.storage.set(SAVED_USER_KEY, user)
    }

    /// Returns whether a profile was stored.
    pub fn forget(&self) -> Result<bool, StorageError> {
        self.storage.remove(SAVED_USER_KEY)
    }
}
