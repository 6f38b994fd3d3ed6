//! Shopping cart state and its reducer.
//!
//! [`CartState::apply`] is the only way a cart changes. It is a pure function of the
//! current state and one [`CartAction`]: no I/O, no notifications, nothing read from
//! outside the state it consumes. Side effects (the "added to your cart" toast) belong
//! to whoever dispatches the action.
//!
//! Invariants kept by every transition:
//! - `total_price` equals the sum of `price * quantity` over `items`;
//! - no line has a quantity below 1;
//! - a pizza/size pair or a beverage appears on at most one line.

use crate::model::catalog::{Beverage, Pizza, Size};
use crate::model::ids::CartId;
use crate::model::money::{line_total, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One cart line. The unit price is fixed when the line is first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartLineItem {
    Pizza {
        pizza: Pizza,
        size: Size,
        quantity: u32,
        price: Money,
    },
    Beverage {
        beverage: Beverage,
        quantity: u32,
        price: Money,
    },
}

impl CartLineItem {
    pub fn quantity(&self) -> u32 {
        match self {
            CartLineItem::Pizza { quantity, .. } | CartLineItem::Beverage { quantity, .. } => {
                *quantity
            }
        }
    }

    pub fn unit_price(&self) -> Money {
        match self {
            CartLineItem::Pizza { price, .. } | CartLineItem::Beverage { price, .. } => *price,
        }
    }

    pub fn line_total(&self) -> Money {
        line_total(self.unit_price(), self.quantity())
    }

    /// Name shown in the cart, e.g. "Margherita (Medium)".
    pub fn label(&self) -> String {
        match self {
            CartLineItem::Pizza { pizza, size, .. } => format!("{} ({})", pizza.name, size.name),
            CartLineItem::Beverage { beverage, .. } => beverage.name.clone(),
        }
    }

    fn quantity_mut(&mut self) -> &mut u32 {
        match self {
            CartLineItem::Pizza { quantity, .. } | CartLineItem::Beverage { quantity, .. } => {
                quantity
            }
        }
    }

    fn is_same_pizza(&self, pizza: &Pizza, size: &Size) -> bool {
        matches!(self, CartLineItem::Pizza { pizza: p, size: s, .. } if p.id == pizza.id && s.id == size.id)
    }

    fn is_same_beverage(&self, beverage: &Beverage) -> bool {
        matches!(self, CartLineItem::Beverage { beverage: b, .. } if b.id == beverage.id)
    }
}

/// Everything the cart can be asked to do.
///
/// Indices and quantities are signed because they come straight from the UI; negative
/// values are rejected by the reducer as no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    AddPizza { pizza: Pizza, size: Size, price: Money },
    AddBeverage { beverage: Beverage },
    RemoveItem { index: isize },
    UpdateQuantity { index: isize, quantity: i64 },
    Clear,
}

/// The items a customer intends to buy and their running total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_price: Money,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The maintained subtotal (no delivery fee).
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines (the badge on the cart icon).
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(CartLineItem::quantity).sum()
    }

    /// Sum of line totals, computed from scratch. Only used to check the invariant.
    pub fn recomputed_total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Runs one transition.
    pub fn apply(mut self, action: CartAction) -> Self {
        match action {
            CartAction::AddPizza { pizza, size, price } => {
                let at = self.items.iter().position(|i| i.is_same_pizza(&pizza, &size));
                self.bump_or_push(
                    at,
                    CartLineItem::Pizza {
                        pizza,
                        size,
                        quantity: 1,
                        price,
                    },
                );
            }
            CartAction::AddBeverage { beverage } => {
                let at = self.items.iter().position(|i| i.is_same_beverage(&beverage));
                let price = beverage.price;
                self.bump_or_push(
                    at,
                    CartLineItem::Beverage {
                        beverage,
                        quantity: 1,
                        price,
                    },
                );
            }
            CartAction::RemoveItem { index } => {
                let Some(index) = self.position(index) else {
                    debug!(index, len = self.items.len(), "remove ignored: index out of range");
                    return self;
                };
                let line = self.items.remove(index);
                self.total_price -= line.line_total();
            }
            CartAction::UpdateQuantity { index, quantity } => {
                let (Some(index), Ok(quantity)) = (self.position(index), u32::try_from(quantity))
                else {
                    debug!(index, quantity, "update ignored: bad index or quantity");
                    return self;
                };
                if quantity < 1 {
                    debug!(quantity, "update ignored: quantity below 1");
                    return self;
                }
                let Some(line) = self.items.get_mut(index) else {
                    return self;
                };
                let old = line.quantity();
                *line.quantity_mut() = quantity;
                let price = line.unit_price();
                self.total_price += price * (Money::from(quantity) - Money::from(old));
            }
            CartAction::Clear => return Self::default(),
        }
        debug_assert_eq!(self.total_price, self.recomputed_total());
        self
    }

    /// Convenience wrappers, one per action.
    pub fn add_pizza(self, pizza: Pizza, size: Size, price: Money) -> Self {
        self.apply(CartAction::AddPizza { pizza, size, price })
    }

    pub fn add_beverage(self, beverage: Beverage) -> Self {
        self.apply(CartAction::AddBeverage { beverage })
    }

    pub fn remove_item(self, index: isize) -> Self {
        self.apply(CartAction::RemoveItem { index })
    }

    pub fn update_quantity(self, index: isize, quantity: i64) -> Self {
        self.apply(CartAction::UpdateQuantity { index, quantity })
    }

    pub fn clear(self) -> Self {
        self.apply(CartAction::Clear)
    }

    /// One more unit on the line at `at`, or `line` appended. The total moves by the unit
    /// price of whichever line received the unit.
    fn bump_or_push(&mut self, at: Option<usize>, line: CartLineItem) {
        let unit = match at {
            Some(at) => {
                let existing = &mut self.items[at];
                *existing.quantity_mut() += 1;
                existing.unit_price()
            }
            None => {
                let unit = line.unit_price();
                self.items.push(line);
                unit
            }
        };
        self.total_price += unit;
    }

    fn position(&self, index: isize) -> Option<usize> {
        usize::try_from(index).ok().filter(|i| *i < self.items.len())
    }
}

/// A session's cart as held by the cart actor.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: CartId,
    /// Free-form session label (browser session, kiosk, ...), used in logs only.
    pub session: String,
    pub state: CartState,
}

/// Payload for opening a new cart.
#[derive(Debug, Clone, Default)]
pub struct CartCreate {
    pub session: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::{BeverageId, PizzaId, SizeId};
    use rust_decimal::Decimal;

    fn margherita() -> Pizza {
        Pizza::new(PizzaId(1), "Margherita", "Tomato, mozzarella, basil")
    }

    fn pepperoni() -> Pizza {
        Pizza::new(PizzaId(2), "Pepperoni", "Spicy")
    }

    fn medium() -> Size {
        Size::new(SizeId(2), "Medium", 30)
    }

    fn large() -> Size {
        Size::new(SizeId(3), "Large", 35)
    }

    fn coke() -> Beverage {
        Beverage::new(BeverageId(1), "Coke", Decimal::new(500, 2))
    }

    fn ten() -> Money {
        Decimal::new(1000, 2)
    }

    #[test]
    fn first_pizza_opens_a_line() {
        let cart = CartState::new().add_pizza(margherita(), medium(), ten());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity(), 1);
        assert_eq!(cart.total_price(), ten());
    }

    #[test]
    fn same_pizza_and_size_merges() {
        let cart = CartState::new()
            .add_pizza(margherita(), medium(), ten())
            .add_pizza(margherita(), medium(), ten());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity(), 2);
        assert_eq!(cart.total_price(), Decimal::new(2000, 2));
    }

    #[test]
    fn different_size_or_pizza_gets_its_own_line() {
        let cart = CartState::new()
            .add_pizza(margherita(), medium(), ten())
            .add_pizza(margherita(), large(), Decimal::new(1400, 2))
            .add_pizza(pepperoni(), medium(), Decimal::new(1200, 2));
        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_price(), Decimal::new(3600, 2));
    }

    #[test]
    fn merged_pizza_keeps_the_first_unit_price() {
        let cart = CartState::new()
            .add_pizza(margherita(), medium(), ten())
            .add_pizza(margherita(), medium(), Decimal::new(1250, 2));
        assert_eq!(cart.items()[0].unit_price(), ten());
        assert_eq!(cart.total_price(), cart.recomputed_total());
    }

    #[test]
    fn beverages_merge_on_id() {
        let cart = CartState::new().add_beverage(coke()).add_beverage(coke());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity(), 2);
        assert_eq!(cart.total_price(), ten());
    }

    #[test]
    fn update_quantity_adjusts_total_by_difference() {
        let cart = CartState::new()
            .add_pizza(margherita(), medium(), ten())
            .add_beverage(coke())
            .update_quantity(0, 3);
        assert_eq!(cart.items()[0].quantity(), 3);
        assert_eq!(cart.total_price(), Decimal::new(3500, 2));

        let cart = cart.update_quantity(0, 1);
        assert_eq!(cart.total_price(), Decimal::new(1500, 2));
    }

    #[test]
    fn update_to_current_quantity_is_identity() {
        let cart = CartState::new()
            .add_pizza(margherita(), medium(), ten())
            .add_pizza(margherita(), medium(), ten());
        let same = cart.clone().update_quantity(0, 2);
        assert_eq!(same, cart);
    }

    #[test]
    fn update_below_one_or_out_of_range_is_ignored() {
        let cart = CartState::new().add_pizza(margherita(), medium(), ten());
        for (index, quantity) in [(0, 0), (0, -1), (1, 2), (-1, 2), (0, i64::MAX)] {
            assert_eq!(cart.clone().update_quantity(index, quantity), cart);
        }
    }

    #[test]
    fn remove_closes_the_gap() {
        let cart = CartState::new()
            .add_pizza(margherita(), medium(), ten())
            .add_beverage(coke())
            .add_pizza(pepperoni(), medium(), Decimal::new(1200, 2))
            .remove_item(1);
        let labels: Vec<_> = cart.items().iter().map(CartLineItem::label).collect();
        assert_eq!(labels, ["Margherita (Medium)", "Pepperoni (Medium)"]);
        assert_eq!(cart.total_price(), Decimal::new(2200, 2));
    }

    #[test]
    fn remove_subtracts_the_whole_line() {
        let cart = CartState::new()
            .add_beverage(coke())
            .update_quantity(0, 4)
            .remove_item(0);
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn remove_out_of_range_is_ignored() {
        let cart = CartState::new().add_beverage(coke());
        assert_eq!(cart.clone().remove_item(-1), cart);
        assert_eq!(cart.clone().remove_item(1), cart);
    }

    #[test]
    fn clear_resets_everything() {
        let cart = CartState::new()
            .add_pizza(margherita(), medium(), ten())
            .add_beverage(coke())
            .clear();
        assert_eq!(cart, CartState::default());
    }

    #[test]
    fn unit_count_sums_quantities() {
        let cart = CartState::new()
            .add_beverage(coke())
            .add_beverage(coke())
            .add_pizza(margherita(), medium(), ten());
        assert_eq!(cart.unit_count(), 3);
    }

    #[test]
    fn line_items_are_tagged_by_type() {
        let cart = CartState::new().add_beverage(coke());
        let json = serde_json::to_value(&cart.items()[0]).unwrap();
        assert_eq!(json["type"], "beverage");
        assert_eq!(json["quantity"], 1);
    }
}
