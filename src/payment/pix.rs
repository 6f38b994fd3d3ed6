//! PIX instant transfer.
//!
//! `process` only issues the QR code; the money arrives later, when the bank calls back.
//! That callback is [`PixPayment::confirm`].

use super::{reject_amount, transaction_id, PaymentProcessor};
use crate::model::{Money, OrderId, PaymentMethod, PaymentResult};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct PixPayment;

impl PixPayment {
    /// The bank reported the transfer for `order_id`.
    pub async fn confirm(&self, order_id: OrderId) -> PaymentResult {
        info!(%order_id, "Confirming PIX payment");
        PaymentResult::approved(transaction_id("PIX-CONF"), Some(order_id))
    }
}

#[async_trait]
impl PaymentProcessor for PixPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Pix
    }

    async fn process(&self, amount: Money, order_id: Option<OrderId>) -> PaymentResult {
        info!(%amount, "Issuing PIX QR code");
        if let Some(refused) = reject_amount(amount) {
            return refused;
        }
        let transaction = transaction_id("PIX");
        // QR payload: PIX<millis><last digits of the transaction>.
        let suffix = transaction.rsplit('-').next().unwrap_or_default();
        let qr_code = format!("PIX{}{suffix}", Utc::now().timestamp_millis());
        PaymentResult {
            pix_qr_code: Some(qr_code),
            ..PaymentResult::approved(transaction, order_id)
        }
    }
}
