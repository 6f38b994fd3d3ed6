//! Orders and their status lifecycle.
//!
//! ```text
//! payment_pending ──► pending ──► in_transit ──► completed
//!        │               │             │
//!        └───────────────┴─────────────┴──────► canceled
//! ```
//!
//! `completed` and `canceled` are terminal. Every transition method reports whether
//! it changed anything; called on a terminal order it changes nothing.

use crate::model::cart::{CartLineItem, CartState};
use crate::model::ids::{BeverageId, CustomerId, OrderId, PizzaId, SizeId};
use crate::model::money::{line_total, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Waiting for an external payment confirmation (card, wallet, PIX).
    PaymentPending,
    /// Accepted, payment collected on delivery.
    Pending,
    InTransit,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Wire name, as stored in the order mirror.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::PaymentPending => "payment_pending",
            OrderStatus::Pending => "pending",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    /// Label shown on the tracking page.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::PaymentPending => "Awaiting payment",
            OrderStatus::Pending => "Processing",
            OrderStatus::InTransit => "On the way",
            OrderStatus::Completed => "Delivered",
            OrderStatus::Canceled => "Canceled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one cart line at ordering time. Catalog entries are referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderItem {
    Pizza {
        pizza: PizzaId,
        size: SizeId,
        quantity: u32,
        price: Money,
    },
    Beverage {
        beverage: BeverageId,
        quantity: u32,
        price: Money,
    },
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        match self {
            OrderItem::Pizza {
                quantity, price, ..
            }
            | OrderItem::Beverage {
                quantity, price, ..
            } => line_total(*price, *quantity),
        }
    }
}

impl From<&CartLineItem> for OrderItem {
    fn from(line: &CartLineItem) -> Self {
        match line {
            CartLineItem::Pizza {
                pizza,
                size,
                quantity,
                price,
            } => OrderItem::Pizza {
                pizza: pizza.id,
                size: size.id,
                quantity: *quantity,
                price: *price,
            },
            CartLineItem::Beverage {
                beverage,
                quantity,
                price,
            } => OrderItem::Beverage {
                beverage: beverage.id,
                quantity: *quantity,
                price: *price,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "customer_id")]
    pub customer: CustomerId,
    pub delivery_address: String,
    pub contact_phone: String,
    /// Cart subtotal plus delivery fee.
    pub total_price: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Builds the order the backend assigned `id` to.
    pub fn from_new(id: OrderId, new: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer: new.customer,
            delivery_address: new.delivery_address,
            contact_phone: new.contact_phone,
            total_price: new.total_price,
            status: new.status,
            created_at,
            items: new.items,
        }
    }

    /// `payment_pending`/`pending` → `in_transit`.
    pub fn confirm_payment(&mut self) -> bool {
        match self.status {
            OrderStatus::PaymentPending | OrderStatus::Pending => {
                self.status = OrderStatus::InTransit;
                true
            }
            _ => false,
        }
    }

    pub fn complete(&mut self) -> bool {
        self.finish(OrderStatus::Completed)
    }

    pub fn cancel(&mut self) -> bool {
        self.finish(OrderStatus::Canceled)
    }

    fn finish(&mut self, status: OrderStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = status;
        true
    }
}

/// Order payload sent to the backend, which assigns the id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(rename = "customer_id")]
    pub customer: CustomerId,
    pub delivery_address: String,
    pub contact_phone: String,
    pub total_price: Money,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    /// Snapshot of `cart` with `total_price` already including the delivery fee.
    pub fn from_cart(
        cart: &CartState,
        customer: CustomerId,
        delivery_address: impl Into<String>,
        contact_phone: impl Into<String>,
        total_price: Money,
        status: OrderStatus,
    ) -> Self {
        Self {
            customer,
            delivery_address: delivery_address.into(),
            contact_phone: contact_phone.into(),
            total_price,
            status,
            items: cart.items().iter().map(OrderItem::from).collect(),
        }
    }
}
