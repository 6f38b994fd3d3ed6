//! # Backend Collaborator
//!
//! The catalog/order service the storefront talks to. Only the calls checkout needs are
//! modelled; the in-process implementation ([`InProcessBackend`]) keeps the records in
//! actors so the storefront runs without a server.

pub mod in_process;

pub use in_process::{InProcessBackend, OrderRecord};

use crate::model::{Customer, Menu, NewCustomer, NewOrder, NewPayment, Order, OrderId, Payment};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    /// The payload was refused.
    #[error("Backend rejected request: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn menu(&self) -> Result<Menu, BackendError>;

    async fn create_customer(&self, customer: NewCustomer) -> Result<Customer, BackendError>;

    /// Stores the order and returns it with its id and creation time.
    async fn create_order(&self, order: NewOrder) -> Result<Order, BackendError>;

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, BackendError>;

    async fn create_payment(&self, payment: NewPayment) -> Result<Payment, BackendError>;
}
