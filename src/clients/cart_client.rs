//! # Cart Client
//!
//! The handle UI code holds. Each mutator sends one [`CartAction`] and returns the cart
//! as it is after the reducer ran.

use crate::cart_actor::CartError;
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Beverage, Cart, CartAction, CartCreate, CartId, CartState, Money, Pizza, Size};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }

    /// Opens an empty cart for a new session.
    #[instrument(skip(self))]
    pub async fn open_cart(&self, session: &str) -> Result<CartId, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartCreate {
                session: session.to_string(),
            })
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, pizza, size), fields(pizza = %pizza.name, size = %size.name))]
    pub async fn add_pizza(
        &self,
        cart: CartId,
        pizza: Pizza,
        size: Size,
        price: Money,
    ) -> Result<CartState, CartError> {
        self.dispatch(cart, CartAction::AddPizza { pizza, size, price })
            .await
    }

    #[instrument(skip(self, beverage), fields(beverage = %beverage.name))]
    pub async fn add_beverage(&self, cart: CartId, beverage: Beverage) -> Result<CartState, CartError> {
        self.dispatch(cart, CartAction::AddBeverage { beverage }).await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, cart: CartId, index: isize) -> Result<CartState, CartError> {
        self.dispatch(cart, CartAction::RemoveItem { index }).await
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        cart: CartId,
        index: isize,
        quantity: i64,
    ) -> Result<CartState, CartError> {
        self.dispatch(cart, CartAction::UpdateQuantity { index, quantity })
            .await
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, cart: CartId) -> Result<CartState, CartError> {
        self.dispatch(cart, CartAction::Clear).await
    }

    /// Current contents of `cart`.
    pub async fn snapshot(&self, cart: CartId) -> Result<CartState, CartError> {
        self.get(cart)
            .await?
            .map(|c| c.state)
            .ok_or_else(|| CartError::NotFound(cart.to_string()))
    }

    /// Items total without the delivery fee.
    pub async fn subtotal(&self, cart: CartId) -> Result<Money, CartError> {
        Ok(self.snapshot(cart).await?.total_price())
    }

    /// Forgets the cart (session ended).
    pub async fn close(&self, cart: CartId) -> Result<(), CartError> {
        self.delete(cart).await
    }

    async fn dispatch(&self, cart: CartId, action: CartAction) -> Result<CartState, CartError> {
        debug!("Sending request");
        self.inner
            .perform_action(cart, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CartError {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
