//! Error types for checkout.

use crate::backend::BackendError;
use crate::cart_actor::CartError;
use crate::model::{OrderId, OrderStatus};
use crate::storage::StorageError;
use crate::tracker_actor::TrackerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,

    /// A form field failed validation; the message names the field.
    #[error("Invalid customer details: {0}")]
    InvalidDetails(String),

    /// The payment collaborator refused. The cart is left as it was.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Order {0} is {1} and not awaiting payment")]
    NotAwaitingPayment(OrderId, OrderStatus),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
