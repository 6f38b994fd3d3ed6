//! Payment methods, processor outcomes and the payment record kept by the backend.

use crate::model::ids::{OrderId, PaymentId};
use crate::model::order::OrderStatus;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    /// Paid on delivery.
    Cash,
    Pix,
    /// Third-party wallet (Mercado Pago).
    Wallet,
}

impl PaymentMethod {
    /// Status a new order starts in. Cash skips `payment_pending` since no external
    /// confirmation will ever arrive for it.
    pub fn initial_status(self) -> OrderStatus {
        match self {
            PaymentMethod::Cash => OrderStatus::Pending,
            PaymentMethod::CreditCard | PaymentMethod::Pix | PaymentMethod::Wallet => {
                OrderStatus::PaymentPending
            }
        }
    }

    /// True when a successful `process` already means the money is collected.
    pub fn confirms_immediately(self) -> bool {
        matches!(self, PaymentMethod::CreditCard | PaymentMethod::Wallet)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Wallet => "wallet",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one payment attempt. Processors never fail with an `Err`; a declined or
/// invalid payment is `success: false` with a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix_qr_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
}

impl PaymentResult {
    pub fn approved(transaction_id: String, order_id: Option<OrderId>) -> Self {
        Self {
            success: true,
            transaction_id: Some(transaction_id),
            order_id,
            ..Self::default()
        }
    }

    pub fn declined(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    /// PIX code issued, waiting for the bank.
    Awaiting,
}

/// Payment record payload sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    #[serde(rename = "order")]
    pub order_id: OrderId,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    #[serde(rename = "order")]
    pub order_id: OrderId,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_last_four: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl Payment {
    pub fn from_new(id: PaymentId, new: NewPayment) -> Self {
        Self {
            id,
            order_id: new.order_id,
            payment_method: new.payment_method,
            payment_status: new.payment_status,
            card_last_four: new.card_last_four,
            transaction_id: new.transaction_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cash_starts_pending_everything_else_awaits_payment() {
        assert_eq!(PaymentMethod::Cash.initial_status(), OrderStatus::Pending);
        for m in [PaymentMethod::CreditCard, PaymentMethod::Pix, PaymentMethod::Wallet] {
            assert_eq!(m.initial_status(), OrderStatus::PaymentPending);
        }
    }

    #[test]
    fn only_card_and_wallet_confirm_on_process() {
        assert!(PaymentMethod::CreditCard.confirms_immediately());
        assert!(PaymentMethod::Wallet.confirms_immediately());
        assert!(!PaymentMethod::Pix.confirms_immediately());
        assert!(!PaymentMethod::Cash.confirms_immediately());
    }

    #[test]
    fn declined_result_omits_empty_fields() {
        let json = serde_json::to_value(PaymentResult::declined("bad card")).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "bad card"}));
    }
}
