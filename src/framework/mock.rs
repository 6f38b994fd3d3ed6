//! # Mock Framework
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. Domain clients
//! (`TrackerClient`, `CartClient`) can then be tested without spawning anything, and
//! failures that are hard to provoke for real (a closed actor, a store error) are one
//! `return_err` away.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | None, only scripted replies | Real store |
//! | Error injection | `return_err` | Needs a broken store |
//! | Use | Logic *around* a client | The entity hooks themselves |
//!
//! ```rust
//! use pizzeria_storefront::framework::mock::MockClient;
//! use pizzeria_storefront::framework::FrameworkError;
//! use pizzeria_storefront::model::{Order, OrderId};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Order>::new();
//!     mock.expect_get(OrderId(7)).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(OrderId(7)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For a lower-level view, [`create_mock_client`] returns the raw receiver so a test can
//! inspect each [`ResourceRequest`] and answer it by hand.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Clear {
        response: Result<usize, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "get",
            Expectation::List { .. } => "list",
            Expectation::Create { .. } => "create",
            Expectation::Clear { .. } => "clear",
            Expectation::Action { .. } => "action",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered. A request that does
/// not match the next expectation (wrong kind or wrong id) panics the mock task, which
/// the caller sees as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Clear { respond_to },
                        Some(Expectation::Clear { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "action sent to unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        panic!(
                            "unexpected request {}, expected {}",
                            request_name(&request),
                            expectation.as_ref().map_or("nothing", Expectation::name)
                        );
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `list`.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects a `create` with any payload.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `clear`.
    pub fn expect_clear(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::Clear { response })
    }

    /// Expects an action on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics if any registered expectation was not consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn builder<R: 'static>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Finishes one expectation with its scripted reply.
#[must_use = "an expectation is only registered by return_ok or return_err"]
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Reply with `value`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Reply with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        lock(&self.expectations).push_back(expectation);
    }
}

fn request_name<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::List { .. } => "list",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Clear { .. } => "clear",
        ResourceRequest::Action { .. } => "action",
    }
}

/// A client plus the raw receiving end of its channel.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cart, CartAction, CartCreate, CartId, CartState};

    #[tokio::test]
    async fn raw_receiver_sees_the_payload() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);

        let task = tokio::spawn(async move {
            client
                .create(CartCreate {
                    session: "kiosk-2".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("create request");
        assert_eq!(payload.session, "kiosk-2");
        responder.send(Ok(CartId(1))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), CartId(1));
    }

    #[tokio::test]
    async fn expectations_answer_in_order() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_create().return_ok(CartId(4));
        mock.expect_action(CartId(4)).return_ok(CartState::default());

        let client = mock.client();
        let id = client.create(CartCreate::default()).await.unwrap();
        let state = client.perform_action(id, CartAction::Clear).await.unwrap();

        assert!(state.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_request_drops_the_reply() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_list().return_ok(Vec::new());

        let result = mock.client().get(CartId(1)).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
