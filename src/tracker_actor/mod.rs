//! # Order Tracker Actor
//!
//! Serialises every status change of the customer's mirrored orders. Orders are kept in
//! the [`StoredOrderMirror`], so each transition is persisted as part of handling the
//! message, and nothing else writes the mirror while the tracker runs.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`schedule`] - [`DeliverySchedule`], the cancellable auto-completion timers
//! - [`error`] - [`TrackerError`]
//!
//! ## Wiring
//!
//! The delivery timers need a handle back to the tracker, which only exists once the
//! actor is built. The context is therefore created from the returned client and
//! injected at `run()`:
//!
//! ```rust,ignore
//! let (actor, client) = tracker_actor::new(32, StoredOrderMirror::new(storage));
//! let context = TrackerContext::new(notifier, Duration::from_secs(180), &client);
//! tokio::spawn(actor.run(context));
//! ```

pub mod entity;
pub mod error;
pub mod schedule;

pub use entity::{ORDER_CANCELED, ORDER_DELIVERED, ORDER_PROCESSING_FAILED, PAYMENT_CONFIRMED};
pub use error::*;
pub use schedule::DeliverySchedule;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Order;
use crate::notify::Notifier;
use crate::storage::StoredOrderMirror;
use std::sync::Arc;
use std::time::Duration;

/// Status transitions the tracker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerAction {
    /// External payment arrived: `payment_pending`/`pending` → `in_transit`, then the
    /// delivery timer starts.
    ConfirmPayment,
    Complete,
    Cancel,
    /// Sent by the delivery timer. Completes the order only if it is still in transit.
    AutoComplete,
}

/// Dependencies of the tracker's entity hooks.
pub struct TrackerContext {
    pub notifier: Arc<dyn Notifier>,
    pub deliveries: DeliverySchedule,
}

impl TrackerContext {
    pub fn new(notifier: Arc<dyn Notifier>, delay: Duration, tracker: &ResourceClient<Order>) -> Self {
        Self {
            notifier,
            deliveries: DeliverySchedule::new(delay, tracker),
        }
    }
}

/// Creates the tracker actor over `mirror` and its client.
pub fn new(
    buffer_size: usize,
    mirror: StoredOrderMirror,
) -> (ResourceActor<Order, StoredOrderMirror>, ResourceClient<Order>) {
    ResourceActor::with_store(buffer_size, mirror)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::FrameworkError;
    use crate::model::{CustomerId, OrderId, OrderStatus};
    use crate::notify::RecordingNotifier;
    use crate::storage::LocalStorage;
    use chrono::Utc;
    use rust_decimal::Decimal;

    const DELAY: Duration = Duration::from_secs(180);

    fn order(id: u32, status: OrderStatus) -> Order {
        Order {
            id: OrderId(id),
            customer: CustomerId(1),
            delivery_address: "Rua D, 4".to_string(),
            contact_phone: "555-0103".to_string(),
            total_price: Decimal::new(1399, 2),
            status,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    fn start() -> (ResourceClient<Order>, RecordingNotifier, tokio::task::JoinHandle<()>) {
        start_on(LocalStorage::in_memory())
    }

    fn start_on(
        storage: LocalStorage,
    ) -> (ResourceClient<Order>, RecordingNotifier, tokio::task::JoinHandle<()>) {
        let (actor, client) = new(8, StoredOrderMirror::new(storage));
        let recorder = RecordingNotifier::new();
        let context = TrackerContext::new(Arc::new(recorder.clone()), DELAY, &client);
        let handle = tokio::spawn(actor.run(context));
        (client, recorder, handle)
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_backend_ids() {
        let (client, _, _) = start();
        let id = client
            .create(order(41, OrderStatus::PaymentPending))
            .await
            .unwrap();
        assert_eq!(id, OrderId(41));
    }

    #[tokio::test(start_paused = true)]
    async fn delivery_timer_completes_in_transit_order() {
        let (client, recorder, _) = start();
        let id = client.create(order(1, OrderStatus::PaymentPending)).await.unwrap();

        let confirmed = client
            .perform_action(id, TrackerAction::ConfirmPayment)
            .await
            .unwrap();
        assert_eq!(confirmed.status, OrderStatus::InTransit);

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;

        let done = client.get(id).await.unwrap().unwrap();
        assert_eq!(done.status, OrderStatus::Completed);
        assert_eq!(recorder.messages(), [PAYMENT_CONFIRMED, ORDER_DELIVERED]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_delivery_sticks() {
        let (client, recorder, _) = start();
        let id = client.create(order(2, OrderStatus::PaymentPending)).await.unwrap();
        client
            .perform_action(id, TrackerAction::ConfirmPayment)
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_secs(60)).await;
        client.perform_action(id, TrackerAction::Cancel).await.unwrap();
        tokio::time::sleep(DELAY * 2).await;

        let order = client.get(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Canceled);
        assert_eq!(recorder.messages(), [PAYMENT_CONFIRMED, ORDER_CANCELED]);
    }

    #[tokio::test(start_paused = true)]
    async fn late_auto_completion_does_not_resurrect() {
        let (client, recorder, _) = start();
        let id = client.create(order(3, OrderStatus::Canceled)).await.unwrap();

        let order = client
            .perform_action(id, TrackerAction::AutoComplete)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Canceled);
        assert!(recorder.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn second_confirmation_is_silent() {
        let (client, recorder, _) = start();
        let id = client.create(order(5, OrderStatus::Pending)).await.unwrap();
        client
            .perform_action(id, TrackerAction::ConfirmPayment)
            .await
            .unwrap();
        client
            .perform_action(id, TrackerAction::ConfirmPayment)
            .await
            .unwrap();
        assert_eq!(recorder.messages(), [PAYMENT_CONFIRMED]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_with_pending_timer() {
        let (client, _, handle) = start();
        let id = client.create(order(6, OrderStatus::PaymentPending)).await.unwrap();
        client
            .perform_action(id, TrackerAction::ConfirmPayment)
            .await
            .unwrap();

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_write_sends_nothing_and_keeps_the_timer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.json");
        let blocker = path.with_extension("json.tmp");
        let (client, recorder, _) = start_on(LocalStorage::open(&path).unwrap());

        let pix = client.create(order(10, OrderStatus::PaymentPending)).await.unwrap();
        let out = client.create(order(11, OrderStatus::PaymentPending)).await.unwrap();
        client
            .perform_action(out, TrackerAction::ConfirmPayment)
            .await
            .unwrap();

        // A directory where the temp file goes makes every write fail.
        std::fs::create_dir(&blocker).unwrap();
        let confirm = client.perform_action(pix, TrackerAction::ConfirmPayment).await;
        assert!(matches!(confirm, Err(FrameworkError::StoreError(_))));
        let cancel = client.perform_action(out, TrackerAction::Cancel).await;
        assert!(matches!(cancel, Err(FrameworkError::StoreError(_))));
        assert_eq!(recorder.messages(), [PAYMENT_CONFIRMED]);
        std::fs::remove_dir(&blocker).unwrap();

        tokio::time::sleep(DELAY + Duration::from_secs(1)).await;

        let pix = client.get(pix).await.unwrap().unwrap();
        assert_eq!(pix.status, OrderStatus::PaymentPending);
        let out = client.get(out).await.unwrap().unwrap();
        assert_eq!(out.status, OrderStatus::Completed);
        assert_eq!(recorder.messages(), [PAYMENT_CONFIRMED, ORDER_DELIVERED]);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_aborts_delivery_timers() {
        let (client, recorder, _) = start();
        let id = client.create(order(12, OrderStatus::PaymentPending)).await.unwrap();
        client
            .perform_action(id, TrackerAction::ConfirmPayment)
            .await
            .unwrap();

        assert_eq!(client.clear().await.unwrap(), 1);
        // Same id again: a surviving timer would complete it.
        client.create(order(12, OrderStatus::InTransit)).await.unwrap();
        tokio::time::sleep(DELAY * 2).await;

        let order = client.get(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::InTransit);
        assert_eq!(recorder.messages(), [PAYMENT_CONFIRMED]);
    }
}
