//! [`ActorEntity`] implementation for [`Order`], as seen by the tracker.
//!
//! The tracker never invents orders: `create` takes the order the backend returned and
//! keeps its id. Every transition is a [`TrackerAction`]; a transition that does not
//! apply (anything after a terminal state, a second payment confirmation) returns the
//! order unchanged and emits nothing.
//!
//! Notifications and delivery timers follow the status change only once the mirror has
//! been written, in `after_action`. A failed write leaves the customer uninformed and any
//! running timer in place.

use super::error::TrackerError;
use super::{TrackerAction, TrackerContext};
use crate::framework::ActorEntity;
use crate::model::{Order, OrderId, OrderStatus};
use async_trait::async_trait;
use std::convert::Infallible;
use tracing::{debug, info};

pub const PAYMENT_CONFIRMED: &str = "Payment confirmed! Your order is on its way.";
pub const ORDER_DELIVERED: &str = "Your order has been delivered!";
pub const ORDER_CANCELED: &str = "Your order was canceled.";
pub const ORDER_PROCESSING_FAILED: &str = "Could not process your order after payment.";

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = Order;
    type Update = Infallible;
    type Action = TrackerAction;
    type ActionResult = Order;
    type Context = TrackerContext;
    type Error = TrackerError;

    fn assign_id(order: &Order, _next: u32) -> OrderId {
        order.id
    }

    fn from_create_params(_id: OrderId, order: Order) -> Result<Self, TrackerError> {
        Ok(order)
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &TrackerContext) -> Result<(), TrackerError> {
        match update {}
    }

    async fn on_delete(&self, ctx: &TrackerContext) -> Result<(), TrackerError> {
        ctx.deliveries.cancel(self.id);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TrackerAction,
        ctx: &TrackerContext,
    ) -> Result<Order, TrackerError> {
        let before = self.status;
        match action {
            TrackerAction::ConfirmPayment => {
                self.confirm_payment();
            }
            TrackerAction::Complete => {
                self.complete();
            }
            TrackerAction::Cancel => {
                self.cancel();
            }
            TrackerAction::AutoComplete => {
                ctx.deliveries.fired(self.id);
                if self.status == OrderStatus::InTransit {
                    self.complete();
                }
            }
        }

        if self.status == before {
            debug!(id = %self.id, status = %self.status, ?action, "Transition skipped");
        } else {
            info!(id = %self.id, from = %before, to = %self.status, "Order status changed");
        }
        Ok(self.clone())
    }

    async fn after_action(&self, previous: &Order, ctx: &TrackerContext) {
        if self.status == previous.status {
            return;
        }
        match self.status {
            OrderStatus::InTransit => {
                ctx.notifier.success(PAYMENT_CONFIRMED);
                ctx.deliveries.schedule(self.id);
            }
            OrderStatus::Completed => {
                ctx.deliveries.cancel(self.id);
                ctx.notifier.success(ORDER_DELIVERED);
            }
            OrderStatus::Canceled => {
                ctx.deliveries.cancel(self.id);
                ctx.notifier.error(ORDER_CANCELED);
            }
            OrderStatus::PaymentPending | OrderStatus::Pending => {}
        }
    }

    async fn on_clear(ctx: &TrackerContext) {
        ctx.deliveries.cancel_all();
    }
}
