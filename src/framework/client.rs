//! # Generic Client
//!
//! The sending half of a `ResourceActor`. Cheap to clone; every method is one request
//! over the actor's mpsc channel and one reply over a oneshot.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// The actor keeps running while at least one `ResourceClient` is alive.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// A handle that does not keep the actor alive.
    ///
    /// Used by tasks the actor spawns for itself (delivery timers); holding a strong
    /// client there would stop the actor from ever seeing its channel close.
    pub fn downgrade(&self) -> WeakResourceClient<T> {
        WeakResourceClient {
            sender: self.sender.downgrade(),
        }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn clear(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Clear { respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

/// Non-owning counterpart of [`ResourceClient`].
pub struct WeakResourceClient<T: ActorEntity> {
    sender: mpsc::WeakSender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for WeakResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> WeakResourceClient<T> {
    /// `None` once every strong client has been dropped.
    pub fn upgrade(&self) -> Option<ResourceClient<T>> {
        self.sender.upgrade().map(ResourceClient::new)
    }
}
