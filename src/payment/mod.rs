//! # Payment Collaborators
//!
//! Every method implements [`PaymentProcessor`]. Processors only report an outcome;
//! moving the order along afterwards is the checkout's job. None of them talk to a real
//! gateway: they validate what a gateway would reject and hand out transaction ids in
//! the gateway's format.
//!
//! | Method | Transaction id | Order after `process` |
//! |---|---|---|
//! | [`CardPayment`] | `CC-…` | confirmed |
//! | [`WalletPayment`] | `MP-…` | confirmed |
//! | [`CashPayment`] | `CASH-…` | pending, paid on delivery |
//! | [`PixPayment`] | `PIX-…` plus a QR payload | waits for [`PixPayment::confirm`] |

pub mod card;
pub mod cash;
pub mod pix;
pub mod wallet;

pub use card::{CardDetails, CardError, CardPayment};
pub use cash::CashPayment;
pub use pix::PixPayment;
pub use wallet::WalletPayment;

use crate::model::{Money, OrderId, PaymentMethod, PaymentResult};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU32, Ordering};

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    fn method(&self) -> PaymentMethod;

    /// Charges `amount`. Never errors: a refusal is `success: false` with a message.
    async fn process(&self, amount: Money, order_id: Option<OrderId>) -> PaymentResult;

    /// Last four card digits, for the payment record.
    fn card_last_four(&self) -> Option<String> {
        None
    }
}

static SEQUENCE: AtomicU32 = AtomicU32::new(1);

/// `PREFIX-<unix millis>-<seq>`, unique within the process.
pub(crate) fn transaction_id(prefix: &str) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1000;
    format!("{prefix}-{}-{seq:03}", Utc::now().timestamp_millis())
}

/// Refusal shared by every method.
pub(crate) fn reject_amount(amount: Money) -> Option<PaymentResult> {
    (amount <= Decimal::ZERO).then(|| PaymentResult::declined(format!("Invalid amount: {amount}")))
}
