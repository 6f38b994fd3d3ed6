//! Third-party wallet (Mercado Pago) checkout.

use super::{reject_amount, transaction_id, PaymentProcessor};
use crate::model::{Money, OrderId, PaymentMethod, PaymentResult};
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalletPayment;

#[async_trait]
impl PaymentProcessor for WalletPayment {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Wallet
    }

    async fn process(&self, amount: Money, order_id: Option<OrderId>) -> PaymentResult {
        info!(%amount, "Processing wallet payment");
        reject_amount(amount).unwrap_or_else(|| PaymentResult::approved(transaction_id("MP"), order_id))
    }
}
