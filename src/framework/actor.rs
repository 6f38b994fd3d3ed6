//! # Generic Actor Server
//!
//! `ResourceActor` owns a store of entities and the receiving end of a channel. It
//! processes one message at a time, which is what makes every cart mutation and every
//! order transition atomic with respect to the others.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use crate::framework::store::{EntityStore, MemoryStore};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// **Concurrency Model**:
/// Each actor runs in its own Tokio task and drains its channel sequentially, so the
/// store needs no lock. Timers and other tasks that want to change an entity send a
/// message like everybody else.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` (in-memory) or `ResourceActor::with_store()`.
/// 2. **Wire**: build the entity `Context`, possibly from the returned client.
/// 3. **Run**: spawn `actor.run(context)`.
///
/// # Operations
///
/// * **Create**: picks an id via [`ActorEntity::assign_id`], builds the entity, runs
///   `on_create`, appends it to the store.
/// * **Get / List**: copies out of the store.
/// * **Update / Action**: loads the entity, runs the hook on the copy, writes it back.
///   A failing hook leaves the stored entity untouched. Actions then run
///   `after_action`, but only if the write succeeded.
/// * **Delete / Clear**: runs `on_delete` and removes; Clear runs `on_clear` once the
///   store is empty.
pub struct ResourceActor<T: ActorEntity, S: EntityStore<T> = MemoryStore<T>> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: S,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an in-memory `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the channel capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_store(buffer_size, MemoryStore::default())
    }
}

impl<T: ActorEntity, S: EntityStore<T>> ResourceActor<T, S> {
    /// Creates an actor backed by the given store.
    pub fn with_store(buffer_size: usize, store: S) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Starts the id sequence at `next_id` instead of 1, for stores whose ids outlive
    /// the actor.
    pub fn with_first_id(mut self, next_id: u32) -> Self {
        self.next_id = next_id.max(1);
        self
    }

    fn size(&self) -> usize {
        self.store.count().unwrap_or_default()
    }

    /// Runs the actor's event loop, processing messages until every strong client is dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Cart" instead of "pizzeria_storefront::model::cart::Cart"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.size(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::assign_id(&params, self.next_id);
                    self.next_id += 1;
                    let _ = respond_to.send(self.create(id, params, &context, entity_type).await);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map_err(store_error);
                    let found = matches!(item, Ok(Some(_)));
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(item);
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.store.list().map_err(store_error);
                    debug!(entity_type, ok = items.is_ok(), "List");
                    let _ = respond_to.send(items);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self
                        .modify(&id, entity_type, |mut item, ctx| async move {
                            item.on_update(update, ctx).await.map(|()| (item.clone(), item))
                        }, &context)
                        .await
                        .map(|(reply, _)| reply);
                    if result.is_ok() {
                        info!(entity_type, %id, "Updated");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(&id, &context, entity_type).await);
                }
                ResourceRequest::Clear { respond_to } => {
                    let result = self.store.clear().map_err(store_error);
                    if let Ok(dropped) = &result {
                        T::on_clear(&context).await;
                        info!(entity_type, dropped, "Cleared");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = match self
                        .modify(&id, entity_type, |mut item, ctx| async move {
                            let previous = item.clone();
                            item.handle_action(action, ctx)
                                .await
                                .map(|out| ((out, previous), item))
                        }, &context)
                        .await
                    {
                        Ok(((out, previous), stored)) => {
                            stored.after_action(&previous, &context).await;
                            Ok(out)
                        }
                        Err(e) => Err(e),
                    };
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.size(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<T::Id, FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        if !self.store.append(id.clone(), item).map_err(store_error)? {
            warn!(entity_type, %id, "Duplicate id");
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        info!(entity_type, %id, size = self.size(), "Created");
        Ok(id)
    }

    async fn delete(
        &mut self,
        id: &T::Id,
        context: &T::Context,
        entity_type: &str,
    ) -> Result<(), FrameworkError> {
        let Some(item) = self.store.get(id).map_err(store_error)? else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        self.store.remove(id).map_err(store_error)?;
        info!(entity_type, %id, size = self.size(), "Deleted");
        Ok(())
    }

    /// Load, run `hook` on the copy, write the copy back. The hook returns the reply
    /// together with the entity to persist; both come back once the write succeeded.
    async fn modify<'c, R, F, Fut>(
        &mut self,
        id: &T::Id,
        entity_type: &str,
        hook: F,
        context: &'c T::Context,
    ) -> Result<(R, T), FrameworkError>
    where
        F: FnOnce(T, &'c T::Context) -> Fut,
        Fut: std::future::Future<Output = Result<(R, T), T::Error>>,
    {
        let Some(item) = self.store.get(id).map_err(store_error)? else {
            warn!(entity_type, %id, "Not found");
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let (reply, item) = hook(item, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        if !self.store.update(id, item.clone()).map_err(store_error)? {
            return Err(FrameworkError::NotFound(id.to_string()));
        }
        Ok((reply, item))
    }
}

fn store_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::StoreError(Box::new(e))
}
