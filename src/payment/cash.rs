//! Cash on delivery.

use super::{reject_amount, transaction_id, PaymentProcessor};
use crate::model::{Money, OrderId, PaymentMethod, PaymentResult};
use async_trait::async_trait;
use tracing::info;

/// Always accepted; the courier collects the money.
#[derive(Debug, Clone, Copy, Default)]
pub struct CashPayment;

#[async_trait]
impl PaymentProcessor for CashPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Cash
    }

    async fn process(&self, amount: Money, order_id: Option<OrderId>) -> PaymentResult {
        info!(%amount, "Registering cash payment");
        reject_amount(amount).unwrap_or_else(|| PaymentResult::approved(transaction_id("CASH"), order_id))
    }
}
