//! Type-safe identifiers.
//!
//! Every id is a `u32` on the wire (`#[serde(transparent)]`) and gets its own type so a
//! pizza id can't be passed where a size id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Menu pizza.
    PizzaId, "pizza"
);
id_type!(
    /// Pizza size (small, medium, ...).
    SizeId, "size"
);
id_type!(
    /// Menu beverage.
    BeverageId, "beverage"
);
id_type!(
    /// Row of the pizza/size price table.
    PizzaPriceId, "price"
);
id_type!(
    /// Store location.
    StoreId, "store"
);
id_type!(
    /// Shopping session cart.
    CartId, "cart"
);
id_type!(
    /// Customer record, assigned by the backend.
    CustomerId, "customer"
);
id_type!(
    /// Order, assigned by the backend.
    OrderId, "order"
);
id_type!(
    /// Payment record, assigned by the backend.
    PaymentId, "payment"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&OrderId(42)).unwrap();
        assert_eq!(json, "42");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderId(42));
    }

    #[test]
    fn ids_display_with_prefix() {
        assert_eq!(OrderId(7).to_string(), "order_7");
        assert_eq!(CartId::from(3).to_string(), "cart_3");
    }
}
