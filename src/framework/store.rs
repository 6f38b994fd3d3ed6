//! # Entity Stores
//!
//! Where a `ResourceActor` keeps its entities. The actor only ever talks to the
//! [`EntityStore`] trait, so the medium (a `HashMap`, a JSON blob on disk, a remote
//! cache) can change without touching entity logic.
//!
//! Every mutating call is a full read-modify-write against the store: the actor loads
//! the entity, runs the hook on its own copy, and writes the result back.

use crate::framework::entity::ActorEntity;
use std::collections::HashMap;
use std::convert::Infallible;

/// Repository interface used by [`ResourceActor`](crate::framework::ResourceActor).
pub trait EntityStore<T: ActorEntity>: Send + 'static {
    /// Failure of the underlying medium.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch a copy of one entity.
    fn get(&self, id: &T::Id) -> Result<Option<T>, Self::Error>;

    /// All entities, in the store's natural order.
    fn list(&self) -> Result<Vec<T>, Self::Error>;

    /// Add a new entity. Returns `false` (and stores nothing) if the id is taken.
    fn append(&mut self, id: T::Id, entity: T) -> Result<bool, Self::Error>;

    /// Replace an existing entity. Returns `false` if the id is unknown.
    fn update(&mut self, id: &T::Id, entity: T) -> Result<bool, Self::Error>;

    /// Remove one entity. Returns `false` if the id is unknown.
    fn remove(&mut self, id: &T::Id) -> Result<bool, Self::Error>;

    /// Remove everything, returning how many entities were dropped.
    fn clear(&mut self) -> Result<usize, Self::Error>;

    /// Number of stored entities.
    fn count(&self) -> Result<usize, Self::Error>;
}

/// The default in-memory store. Keeps insertion order for `list`.
pub struct MemoryStore<T: ActorEntity> {
    entities: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: ActorEntity> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: ActorEntity> EntityStore<T> for MemoryStore<T> {
    type Error = Infallible;

    fn get(&self, id: &T::Id) -> Result<Option<T>, Infallible> {
        Ok(self.entities.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<T>, Infallible> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.entities.get(id).cloned())
            .collect())
    }

    fn append(&mut self, id: T::Id, entity: T) -> Result<bool, Infallible> {
        if self.entities.contains_key(&id) {
            return Ok(false);
        }
        self.order.push(id.clone());
        self.entities.insert(id, entity);
        Ok(true)
    }

    fn update(&mut self, id: &T::Id, entity: T) -> Result<bool, Infallible> {
        match self.entities.get_mut(id) {
            Some(slot) => {
                *slot = entity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&mut self, id: &T::Id) -> Result<bool, Infallible> {
        if self.entities.remove(id).is_none() {
            return Ok(false);
        }
        self.order.retain(|kept| kept != id);
        Ok(true)
    }

    fn clear(&mut self) -> Result<usize, Infallible> {
        let dropped = self.entities.len();
        self.entities.clear();
        self.order.clear();
        Ok(dropped)
    }

    fn count(&self) -> Result<usize, Infallible> {
        Ok(self.entities.len())
    }
}
