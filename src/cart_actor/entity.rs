//! [`ActorEntity`] implementation for [`Cart`].
//!
//! The actor owns every open cart. Each [`CartAction`] is run through the pure reducer
//! ([`CartState::apply`]) and, once the new state is in place, the confirmation toast
//! for additions goes out through the injected [`Notifier`].

use super::error::CartError;
use crate::framework::ActorEntity;
use crate::model::{Cart, CartAction, CartCreate, CartId, CartState};
use crate::notify::Notifier;
use async_trait::async_trait;
use std::convert::Infallible;
use std::sync::Arc;

#[async_trait]
impl ActorEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = Infallible;
    type Action = CartAction;
    type ActionResult = CartState;
    type Context = Arc<dyn Notifier>;
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, CartError> {
        Ok(Self {
            id,
            session: params.session,
            state: CartState::default(),
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &Self::Context) -> Result<(), CartError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        notifier: &Self::Context,
    ) -> Result<CartState, CartError> {
        let added = match &action {
            CartAction::AddPizza { pizza, .. } => Some(pizza.name.clone()),
            CartAction::AddBeverage { beverage } => Some(beverage.name.clone()),
            _ => None,
        };

        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);

        if let Some(name) = added {
            notifier.success(&format!("{name} added to your cart"));
        }
        Ok(self.state.clone())
    }
}
