//! Backend records kept in `ResourceActor`s.
//!
//! Customers, orders and payments each get an actor; the actor's id sequence plays the
//! part of the database's auto-increment. Records are write-once, so none of them
//! accepts updates or actions.

use super::{Backend, BackendError};
use crate::framework::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use crate::model::{
    Customer, CustomerId, Menu, NewCustomer, NewOrder, NewPayment, Order, OrderId, Payment,
    PaymentId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::convert::Infallible;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = NewCustomer;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = BackendError;

    fn from_create_params(id: CustomerId, params: NewCustomer) -> Result<Self, BackendError> {
        if params.full_name.trim().is_empty() {
            return Err(BackendError::Rejected("full_name is required".to_string()));
        }
        Ok(Customer::from_new(id, params))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), BackendError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), BackendError> {
        match action {}
    }
}

/// The backend's copy of an order. A separate type from [`Order`], whose actor identity
/// belongs to the tracker's mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord(pub Order);

#[async_trait]
impl ActorEntity for OrderRecord {
    type Id = OrderId;
    type Create = NewOrder;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = BackendError;

    fn from_create_params(id: OrderId, params: NewOrder) -> Result<Self, BackendError> {
        if params.items.is_empty() {
            return Err(BackendError::Rejected("order has no items".to_string()));
        }
        Ok(OrderRecord(Order::from_new(id, params, Utc::now())))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), BackendError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), BackendError> {
        match action {}
    }
}

#[async_trait]
impl ActorEntity for Payment {
    type Id = PaymentId;
    type Create = NewPayment;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = BackendError;

    fn from_create_params(id: PaymentId, params: NewPayment) -> Result<Self, BackendError> {
        Ok(Payment::from_new(id, params))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), BackendError> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), BackendError> {
        match action {}
    }
}

/// [`Backend`] served by three local actors.
#[derive(Clone)]
pub struct InProcessBackend {
    menu: Menu,
    customers: ResourceClient<Customer>,
    orders: ResourceClient<OrderRecord>,
    payments: ResourceClient<Payment>,
}

impl InProcessBackend {
    /// Spawns the record actors. They stop once every clone of the backend is dropped.
    pub fn start(buffer_size: usize, menu: Menu) -> (Self, Vec<JoinHandle<()>>) {
        Self::start_after(buffer_size, menu, OrderId(0))
    }

    /// Like [`start`](Self::start), numbering new orders after `last_order`. Used when
    /// the local mirror already holds orders from an earlier run.
    pub fn start_after(
        buffer_size: usize,
        menu: Menu,
        last_order: OrderId,
    ) -> (Self, Vec<JoinHandle<()>>) {
        let (customer_actor, customers) = ResourceActor::<Customer>::new(buffer_size);
        let (order_actor, orders) = ResourceActor::<OrderRecord>::new(buffer_size);
        let order_actor = order_actor.with_first_id(last_order.0.saturating_add(1));
        let (payment_actor, payments) = ResourceActor::<Payment>::new(buffer_size);

        let handles = vec![
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(order_actor.run(())),
            tokio::spawn(payment_actor.run(())),
        ];
        info!(pizzas = menu.pizzas.len(), "In-process backend started");

        let backend = Self {
            menu,
            customers,
            orders,
            payments,
        };
        (backend, handles)
    }
}

/// Entity validation failures come back as `Rejected`; everything else is plumbing.
fn backend_error(e: FrameworkError) -> BackendError {
    match e {
        FrameworkError::EntityError(inner) => BackendError::Rejected(inner.to_string()),
        other => BackendError::Unavailable(other.to_string()),
    }
}

async fn fetch<T: ActorEntity>(client: &ResourceClient<T>, id: T::Id) -> Result<T, BackendError> {
    let missing = id.to_string();
    client
        .get(id)
        .await
        .map_err(backend_error)?
        .ok_or_else(|| BackendError::Unavailable(format!("{missing} vanished after create")))
}

#[async_trait]
impl Backend for InProcessBackend {
    async fn menu(&self) -> Result<Menu, BackendError> {
        Ok(self.menu.clone())
    }

    #[instrument(skip(self, customer), fields(name = %customer.full_name))]
    async fn create_customer(&self, customer: NewCustomer) -> Result<Customer, BackendError> {
        let id = self.customers.create(customer).await.map_err(backend_error)?;
        fetch(&self.customers, id).await
    }

    #[instrument(skip(self, order), fields(total = %order.total_price, status = %order.status))]
    async fn create_order(&self, order: NewOrder) -> Result<Order, BackendError> {
        let id = self.orders.create(order).await.map_err(backend_error)?;
        Ok(fetch(&self.orders, id).await?.0)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, BackendError> {
        let record = self.orders.get(id).await.map_err(backend_error)?;
        Ok(record.map(|r| r.0))
    }

    #[instrument(skip(self, payment), fields(order = %payment.order_id, method = %payment.payment_method))]
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment, BackendError> {
        let id = self.payments.create(payment).await.map_err(backend_error)?;
        fetch(&self.payments, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderItem, OrderStatus, PaymentMethod, PaymentStatus, PizzaId, SizeId};
    use rust_decimal::Decimal;

    fn new_order(customer: CustomerId) -> NewOrder {
        NewOrder {
            customer,
            delivery_address: "Rua F, 6".to_string(),
            contact_phone: "555-0105".to_string(),
            total_price: Decimal::new(1399, 2),
            status: OrderStatus::PaymentPending,
            items: vec![OrderItem::Pizza {
                pizza: PizzaId(1),
                size: SizeId(2),
                quantity: 1,
                price: Decimal::new(1000, 2),
            }],
        }
    }

    #[tokio::test]
    async fn ids_are_assigned_in_sequence() {
        let (backend, _) = InProcessBackend::start(8, Menu::default());
        let customer = backend
            .create_customer(NewCustomer {
                full_name: "Ana".to_string(),
                contact_phone: "555-0105".to_string(),
                address: "Rua F, 6".to_string(),
                email: None,
            })
            .await
            .unwrap();
        assert_eq!(customer.id, CustomerId(1));

        let first = backend.create_order(new_order(customer.id)).await.unwrap();
        let second = backend.create_order(new_order(customer.id)).await.unwrap();
        assert_eq!((first.id, second.id), (OrderId(1), OrderId(2)));
        assert_eq!(backend.get_order(OrderId(2)).await.unwrap(), Some(second));
        assert_eq!(backend.get_order(OrderId(3)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn order_numbering_resumes_after_last_order() {
        let (backend, _) = InProcessBackend::start_after(8, Menu::default(), OrderId(7));
        let order = backend.create_order(new_order(CustomerId(1))).await.unwrap();
        assert_eq!(order.id, OrderId(8));
    }

    #[tokio::test]
    async fn empty_order_is_rejected() {
        let (backend, _) = InProcessBackend::start(8, Menu::default());
        let mut order = new_order(CustomerId(1));
        order.items.clear();
        assert!(matches!(
            backend.create_order(order).await,
            Err(BackendError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn payment_record_keeps_card_digits() {
        let (backend, _) = InProcessBackend::start(8, Menu::default());
        let payment = backend
            .create_payment(NewPayment {
                order_id: OrderId(1),
                payment_method: PaymentMethod::CreditCard,
                payment_status: PaymentStatus::Completed,
                card_last_four: Some("1234".to_string()),
                transaction_id: Some("CC-1-001".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(payment.id, PaymentId(1));
        assert_eq!(payment.card_last_four.as_deref(), Some("1234"));
    }
}
