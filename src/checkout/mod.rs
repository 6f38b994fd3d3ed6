//! # Checkout
//!
//! Turns a cart and the customer's details into a placed order:
//!
//! 1. refuse an empty cart, validate the form;
//! 2. create the customer (and remember the profile if asked);
//! 3. create the order, total = subtotal + delivery fee, and mirror it locally;
//! 4. run the payment. A refusal stops here with the cart untouched;
//! 5. record the payment, clear the cart;
//! 6. card and wallet payments send the order out for delivery straight away. Cash
//!    orders stay `pending`. PIX orders wait in `payment_pending` for [`CheckoutService::confirm_pix`].

pub mod details;
pub mod error;

pub use details::CustomerDetails;
pub use error::CheckoutError;

use crate::backend::Backend;
use crate::clients::{CartClient, TrackerClient};
use crate::model::{
    round_currency, CartId, Money, NewOrder, NewPayment, Order, OrderId, OrderStatus,
    PaymentMethod, PaymentStatus, SavedUser,
};
use crate::notify::Notifier;
use crate::payment::{PaymentProcessor, PixPayment};
use crate::storage::SavedUserStore;
use crate::tracker_actor::ORDER_PROCESSING_FAILED;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const ORDER_PLACED: &str = "Order placed successfully!";

/// What the confirmation page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub order_id: OrderId,
    /// Subtotal plus delivery fee.
    pub total: Money,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    /// Present for PIX: the code the customer scans.
    pub pix_qr_code: Option<String>,
}

#[derive(Clone)]
pub struct CheckoutService {
    backend: Arc<dyn Backend>,
    carts: CartClient,
    tracker: TrackerClient,
    saved_users: SavedUserStore,
    notifier: Arc<dyn Notifier>,
    delivery_fee: Money,
}

impl CheckoutService {
    pub fn new(
        backend: Arc<dyn Backend>,
        carts: CartClient,
        tracker: TrackerClient,
        saved_users: SavedUserStore,
        notifier: Arc<dyn Notifier>,
        delivery_fee: Money,
    ) -> Self {
        Self {
            backend,
            carts,
            tracker,
            saved_users,
            notifier,
            delivery_fee,
        }
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    /// Amount the customer will be charged for `cart` right now.
    pub async fn quote(&self, cart: CartId) -> Result<Money, CheckoutError> {
        let subtotal = self.carts.subtotal(cart).await?;
        Ok(round_currency(subtotal + self.delivery_fee))
    }

    /// Remembered profile for prefilling the form.
    pub fn saved_customer(&self) -> Result<Option<CustomerDetails>, CheckoutError> {
        Ok(self
            .saved_users
            .load()?
            .as_ref()
            .map(CustomerDetails::from_saved))
    }

    pub fn forget_saved_customer(&self) -> Result<bool, CheckoutError> {
        Ok(self.saved_users.forget()?)
    }

    #[instrument(skip(self, details, payment), fields(method = %payment.method()))]
    pub async fn checkout(
        &self,
        cart: CartId,
        details: &CustomerDetails,
        payment: &dyn PaymentProcessor,
    ) -> Result<Receipt, CheckoutError> {
        let state = self.carts.snapshot(cart).await?;
        if state.is_empty() {
            self.notifier.error("Your cart is empty");
            return Err(CheckoutError::EmptyCart);
        }
        details.validate()?;

        let new_customer = details.to_new_customer();
        if details.save_info {
            if let Err(e) = self.saved_users.save(&SavedUser::from(&new_customer)) {
                warn!(error = %e, "Could not remember customer profile");
            }
        }
        let customer = self.backend.create_customer(new_customer).await?;

        let method = payment.method();
        let total = round_currency(state.total_price() + self.delivery_fee);
        let new_order = NewOrder::from_cart(
            &state,
            customer.id,
            details.delivery_address.trim(),
            details.contact_phone.trim(),
            total,
            method.initial_status(),
        );
        let order = self.backend.create_order(new_order).await?;
        let order_id = order.id;
        info!(%order_id, %total, status = %order.status, "Order created");
        self.tracker.track_new(order.clone()).await?;

        let result = payment.process(total, Some(order_id)).await;
        if !result.success {
            let reason = result
                .error
                .unwrap_or_else(|| "Payment processing failed".to_string());
            warn!(%order_id, %reason, "Payment refused");
            self.notifier.error(&reason);
            return Err(CheckoutError::PaymentFailed(reason));
        }

        self.backend
            .create_payment(NewPayment {
                order_id,
                payment_method: method,
                payment_status: match method {
                    PaymentMethod::Pix => PaymentStatus::Awaiting,
                    _ => PaymentStatus::Completed,
                },
                card_last_four: payment.card_last_four(),
                transaction_id: result.transaction_id.clone(),
            })
            .await?;

        self.carts.clear(cart).await?;
        self.notifier.success(ORDER_PLACED);

        let mut status = order.status;
        if method.confirms_immediately() {
            if let Some(updated) = self.tracker.process_order_after_payment(order_id).await? {
                status = updated.status;
            }
        }
        info!(%order_id, %status, "Checkout complete");

        Ok(Receipt {
            order_id,
            total,
            status,
            payment_method: method,
            transaction_id: result.transaction_id,
            pix_qr_code: result.pix_qr_code,
        })
    }

    /// The bank confirmed the PIX transfer for `order_id`: record it and send the order
    /// out. `Ok(None)` when the order is not in the local mirror.
    ///
    /// Only an order still in `payment_pending` can be confirmed; anything else is
    /// refused with [`CheckoutError::NotAwaitingPayment`] and no payment is recorded.
    #[instrument(skip(self))]
    pub async fn confirm_pix(&self, order_id: OrderId) -> Result<Option<Order>, CheckoutError> {
        let Some(order) = self.tracker.track(order_id).await? else {
            warn!(%order_id, "PIX confirmation for unknown order");
            self.notifier.error(ORDER_PROCESSING_FAILED);
            return Ok(None);
        };
        if order.status != OrderStatus::PaymentPending {
            warn!(%order_id, status = %order.status, "PIX confirmation for order not awaiting payment");
            let err = CheckoutError::NotAwaitingPayment(order_id, order.status);
            self.notifier.error(&err.to_string());
            return Err(err);
        }

        let result = PixPayment.confirm(order_id).await;
        if !result.success {
            let reason = result
                .error
                .unwrap_or_else(|| "PIX confirmation failed".to_string());
            self.notifier.error(&reason);
            return Err(CheckoutError::PaymentFailed(reason));
        }

        self.backend
            .create_payment(NewPayment {
                order_id,
                payment_method: PaymentMethod::Pix,
                payment_status: PaymentStatus::Completed,
                card_last_four: None,
                transaction_id: result.transaction_id,
            })
            .await?;

        Ok(self.tracker.process_order_after_payment(order_id).await?)
    }
}
