//! Menu data as served by the catalog backend.

use crate::model::ids::{BeverageId, PizzaId, PizzaPriceId, SizeId, StoreId};
use crate::model::money::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    pub id: PizzaId,
    #[serde(rename = "pizza_name")]
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Pizza {
    pub fn new(id: PizzaId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub id: SizeId,
    #[serde(rename = "size_name")]
    pub name: String,
    /// Centimetres.
    pub diameter: u32,
    pub description: String,
}

impl Size {
    pub fn new(id: SizeId, name: impl Into<String>, diameter: u32) -> Self {
        Self {
            id,
            name: name.into(),
            diameter,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beverage {
    pub id: BeverageId,
    #[serde(rename = "beverage_name")]
    pub name: String,
    pub description: String,
    pub price: Money,
}

impl Beverage {
    pub fn new(id: BeverageId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
        }
    }
}

/// Price of one pizza in one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PizzaPrice {
    pub id: PizzaPriceId,
    pub pizza: PizzaId,
    pub size: SizeId,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: StoreId,
    pub address: String,
    pub directions: String,
    pub contact_phone: String,
}

/// Everything the menu page shows, fetched once per session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub pizzas: Vec<Pizza>,
    pub sizes: Vec<Size>,
    pub beverages: Vec<Beverage>,
    pub prices: Vec<PizzaPrice>,
    pub stores: Vec<StoreInfo>,
}

impl Menu {
    /// Unit price of `pizza` in `size`, if the price table lists it.
    pub fn price_of(&self, pizza: PizzaId, size: SizeId) -> Option<Money> {
        self.prices
            .iter()
            .find(|p| p.pizza == pizza && p.size == size)
            .map(|p| p.price)
    }

    /// Sizes a pizza can be ordered in, with their prices, in table order.
    pub fn sizes_for(&self, pizza: PizzaId) -> Vec<(&Size, Money)> {
        self.prices
            .iter()
            .filter(|p| p.pizza == pizza)
            .filter_map(|p| {
                self.sizes
                    .iter()
                    .find(|s| s.id == p.size)
                    .map(|s| (s, p.price))
            })
            .collect()
    }

    pub fn pizza(&self, id: PizzaId) -> Option<&Pizza> {
        self.pizzas.iter().find(|p| p.id == id)
    }

    pub fn size(&self, id: SizeId) -> Option<&Size> {
        self.sizes.iter().find(|s| s.id == id)
    }

    pub fn beverage(&self, id: BeverageId) -> Option<&Beverage> {
        self.beverages.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn menu() -> Menu {
        Menu {
            pizzas: vec![Pizza::new(PizzaId(1), "Margherita", "Tomato, basil")],
            sizes: vec![Size::new(SizeId(1), "Small", 25), Size::new(SizeId(2), "Medium", 30)],
            beverages: vec![Beverage::new(BeverageId(1), "Coke", Decimal::new(500, 2))],
            prices: vec![
                PizzaPrice {
                    id: PizzaPriceId(1),
                    pizza: PizzaId(1),
                    size: SizeId(2),
                    price: Decimal::new(1000, 2),
                },
                PizzaPrice {
                    id: PizzaPriceId(2),
                    pizza: PizzaId(1),
                    size: SizeId(1),
                    price: Decimal::new(800, 2),
                },
            ],
            stores: Vec::new(),
        }
    }

    #[test]
    fn price_lookup_matches_pizza_and_size() {
        let menu = menu();
        assert_eq!(menu.price_of(PizzaId(1), SizeId(2)), Some(Decimal::new(1000, 2)));
        assert_eq!(menu.price_of(PizzaId(1), SizeId(9)), None);
    }

    #[test]
    fn sizes_follow_price_table_order() {
        let menu = menu();
        let names: Vec<_> = menu
            .sizes_for(PizzaId(1))
            .into_iter()
            .map(|(s, _)| s.name.as_str())
            .collect();
        assert_eq!(names, ["Medium", "Small"]);
    }

    #[test]
    fn catalog_uses_backend_field_names() {
        let json = serde_json::to_value(Beverage::new(BeverageId(3), "Guaraná", Decimal::new(650, 2))).unwrap();
        assert_eq!(json["beverage_name"], "Guaraná");
    }
}
