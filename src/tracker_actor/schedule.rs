//! Delivery timers.
//!
//! Once an order is on its way, a task sleeps for the delivery delay and then asks the
//! tracker to auto-complete it. The task holds only a weak client, so a pending timer
//! never keeps the tracker alive, and it never touches the order itself: the tracker
//! re-checks the status when the message arrives.
//!
//! Handles are kept per order so a manual `complete`/`cancel` aborts the timer instead of
//! leaving it to fire into a terminal order.

use super::TrackerAction;
use crate::framework::{ResourceClient, WeakResourceClient};
use crate::model::{Order, OrderId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

pub struct DeliverySchedule {
    delay: Duration,
    tracker: WeakResourceClient<Order>,
    timers: Mutex<HashMap<OrderId, AbortHandle>>,
}

impl DeliverySchedule {
    pub fn new(delay: Duration, tracker: &ResourceClient<Order>) -> Self {
        Self {
            delay,
            tracker: tracker.downgrade(),
            timers: Mutex::new(HashMap::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of orders with a timer still running.
    pub fn pending(&self) -> usize {
        self.timers().values().filter(|t| !t.is_finished()).count()
    }

    pub fn is_scheduled(&self, id: OrderId) -> bool {
        self.timers().get(&id).is_some_and(|t| !t.is_finished())
    }

    /// Starts (or restarts) the timer for `id`. Must be called inside a runtime.
    pub fn schedule(&self, id: OrderId) {
        let delay = self.delay;
        let tracker = self.tracker.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(client) = tracker.upgrade() else {
                debug!(%id, "Tracker gone, delivery timer dropped");
                return;
            };
            if let Err(e) = client.perform_action(id, TrackerAction::AutoComplete).await {
                warn!(%id, error = %e, "Auto-completion failed");
            }
        });
        debug!(%id, delay_secs = delay.as_secs(), "Delivery scheduled");
        if let Some(previous) = self.timers().insert(id, task.abort_handle()) {
            previous.abort();
        }
    }

    /// Aborts the timer for `id`. Returns whether one was pending.
    pub fn cancel(&self, id: OrderId) -> bool {
        match self.timers().remove(&id) {
            Some(timer) => {
                let pending = !timer.is_finished();
                timer.abort();
                if pending {
                    debug!(%id, "Delivery timer aborted");
                }
                pending
            }
            None => false,
        }
    }

    /// Aborts every pending timer. Returns how many were still running.
    pub fn cancel_all(&self) -> usize {
        let mut timers = self.timers();
        let pending = timers.values().filter(|t| !t.is_finished()).count();
        for (_, timer) in timers.drain() {
            timer.abort();
        }
        if pending > 0 {
            debug!(pending, "Delivery timers aborted");
        }
        pending
    }

    /// Drops the handle of a timer that has fired, without aborting it.
    pub(super) fn fired(&self, id: OrderId) {
        self.timers().remove(&id);
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<OrderId, AbortHandle>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for DeliverySchedule {
    fn drop(&mut self) {
        let timers = self.timers.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, timer) in timers.drain() {
            timer.abort();
        }
    }
}
