//! # Tracker Client
//!
//! High-level API over the tracker actor. Transitions on an order the mirror does not
//! know are logged and answered with `Ok(None)`; only plumbing or storage failures are
//! errors. A payment confirmation that could not be applied also tells the customer,
//! through the notifier given to [`TrackerClient::with_notifier`].

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderId};
use crate::notify::Notifier;
use crate::tracker_actor::{TrackerAction, TrackerError, ORDER_PROCESSING_FAILED};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Clone)]
pub struct TrackerClient {
    inner: ResourceClient<Order>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl TrackerClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self {
            inner,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Appends a freshly created order to the mirror.
    #[instrument(skip(self, order), fields(id = %order.id, status = %order.status))]
    pub async fn track_new(&self, order: Order) -> Result<OrderId, TrackerError> {
        debug!("Sending request");
        let id = order.id;
        self.inner.create(order).await.map_err(|e| match e {
            FrameworkError::AlreadyExists(_) => TrackerError::AlreadyTracked(id),
            other => Self::map_error(other),
        })
    }

    /// Payment confirmed: the order goes out for delivery and auto-completes after the
    /// configured delay.
    #[instrument(skip(self))]
    pub async fn process_order_after_payment(&self, id: OrderId) -> Result<Option<Order>, TrackerError> {
        let result = self.transition(id, TrackerAction::ConfirmPayment).await;
        if !matches!(result, Ok(Some(_))) {
            if let Some(notifier) = &self.notifier {
                notifier.error(ORDER_PROCESSING_FAILED);
            }
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn complete_order(&self, id: OrderId) -> Result<Option<Order>, TrackerError> {
        self.transition(id, TrackerAction::Complete).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<Option<Order>, TrackerError> {
        self.transition(id, TrackerAction::Cancel).await
    }

    /// The mirrored order, if any.
    pub async fn track(&self, id: OrderId) -> Result<Option<Order>, TrackerError> {
        self.get(id).await
    }

    /// Recent orders, oldest first.
    pub async fn orders(&self) -> Result<Vec<Order>, TrackerError> {
        self.list().await
    }

    /// Forgets every mirrored order. Returns how many were dropped.
    #[instrument(skip(self))]
    pub async fn clear_history(&self) -> Result<usize, TrackerError> {
        debug!("Sending request");
        self.inner.clear().await.map_err(Self::map_error)
    }

    async fn transition(&self, id: OrderId, action: TrackerAction) -> Result<Option<Order>, TrackerError> {
        debug!("Sending request");
        match self.inner.perform_action(id, action).await {
            Ok(order) => Ok(Some(order)),
            Err(e) if e.is_not_found() => {
                warn!(%id, ?action, "Order not in local mirror, nothing to update");
                Ok(None)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[async_trait]
impl ActorClient<Order> for TrackerClient {
    type Error = TrackerError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> TrackerError {
        match e {
            FrameworkError::StoreError(e) => TrackerError::Storage(e.to_string()),
            other => TrackerError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::{CustomerId, OrderStatus};
    use crate::notify::RecordingNotifier;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order(status: OrderStatus) -> Order {
        Order {
            id: OrderId(8),
            customer: CustomerId(2),
            delivery_address: "Rua E, 5".to_string(),
            contact_phone: "555-0104".to_string(),
            total_price: Decimal::new(999, 2),
            status,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    #[tokio::test]
    async fn unknown_order_is_none_not_error() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_action(OrderId(8))
            .return_err(FrameworkError::NotFound("order_8".to_string()));

        let tracker = TrackerClient::new(mock.client());
        assert_eq!(tracker.cancel_order(OrderId(8)).await, Ok(None));
        mock.verify();
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let mut mock = MockClient::<Order>::new();
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        mock.expect_action(OrderId(8))
            .return_err(FrameworkError::StoreError(Box::new(io)));

        let tracker = TrackerClient::new(mock.client());
        let result = tracker.complete_order(OrderId(8)).await;
        assert!(matches!(result, Err(TrackerError::Storage(_))));
    }

    #[tokio::test]
    async fn duplicate_tracking_names_the_order() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create()
            .return_err(FrameworkError::AlreadyExists("order_8".to_string()));

        let tracker = TrackerClient::new(mock.client());
        let result = tracker.track_new(order(OrderStatus::Pending)).await;
        assert_eq!(result, Err(TrackerError::AlreadyTracked(OrderId(8))));
    }

    #[tokio::test]
    async fn confirmation_returns_the_updated_order() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_action(OrderId(8))
            .return_ok(order(OrderStatus::InTransit));

        let tracker = TrackerClient::new(mock.client());
        let updated = tracker
            .process_order_after_payment(OrderId(8))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, OrderStatus::InTransit);
    }

    #[tokio::test]
    async fn unapplied_confirmation_is_reported_to_the_customer() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_action(OrderId(8))
            .return_err(FrameworkError::NotFound("order_8".to_string()));
        mock.expect_action(OrderId(8))
            .return_ok(order(OrderStatus::InTransit));

        let recorder = RecordingNotifier::new();
        let tracker = TrackerClient::new(mock.client()).with_notifier(Arc::new(recorder.clone()));
        assert_eq!(tracker.process_order_after_payment(OrderId(8)).await, Ok(None));
        assert_eq!(recorder.messages(), [ORDER_PROCESSING_FAILED]);

        tracker.process_order_after_payment(OrderId(8)).await.unwrap();
        assert_eq!(recorder.messages(), [ORDER_PROCESSING_FAILED]);
        mock.verify();
    }
}
