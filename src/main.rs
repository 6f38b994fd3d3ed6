//! # Storefront Demo
//!
//! Walks one session through the storefront:
//! 1. Starting the [`StorefrontSystem`] from the environment.
//! 2. Filling a cart with a pizza and a beverage.
//! 3. Paying by card and following the order.
//! 4. A second order paid by PIX, confirmed afterwards.

use pizzeria_storefront::checkout::CustomerDetails;
use pizzeria_storefront::lifecycle::{setup_tracing, StorefrontConfig, StorefrontSystem};
use pizzeria_storefront::model::{
    format_brl, Beverage, BeverageId, Menu, Pizza, PizzaId, PizzaPrice, PizzaPriceId, Size, SizeId,
};
use pizzeria_storefront::payment::{CardDetails, CardPayment, PixPayment};
use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

fn sample_menu() -> Menu {
    Menu {
        pizzas: vec![
            Pizza::new(PizzaId(1), "Margherita", "Tomato, mozzarella, basil"),
            Pizza::new(PizzaId(2), "Calabresa", "Calabresa sausage, onion"),
        ],
        sizes: vec![
            Size::new(SizeId(1), "Small", 25),
            Size::new(SizeId(2), "Medium", 30),
            Size::new(SizeId(3), "Large", 35),
        ],
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
                pizza: PizzaId(2),
                size: SizeId(3),
                price: Decimal::new(4200, 2),
            },
        ],
        stores: Vec::new(),
    }
}

fn customer() -> CustomerDetails {
    CustomerDetails {
        full_name: "Ana Souza".to_string(),
        contact_phone: "555-0100".to_string(),
        delivery_address: "Rua das Flores, 12".to_string(),
        email: Some("ana@example.com".to_string()),
        save_info: true,
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;
    let system = StorefrontSystem::start(config, sample_menu()).map_err(|e| e.to_string())?;
    let menu = system.menu().clone();

    let span = tracing::info_span!("card_order");
    let receipt = async {
        let cart = system
            .carts
            .open_cart("demo-session")
            .await
            .map_err(|e| e.to_string())?;

        let (pizza, size) = (&menu.pizzas[0], &menu.sizes[1]);
        let price = menu
            .price_of(pizza.id, size.id)
            .ok_or_else(|| format!("{} has no price in {}", pizza.name, size.name))?;
        system
            .carts
            .add_pizza(cart, pizza.clone(), size.clone(), price)
            .await
            .map_err(|e| e.to_string())?;
        let state = system
            .carts
            .add_beverage(cart, menu.beverages[0].clone())
            .await
            .map_err(|e| e.to_string())?;
        for line in state.items() {
            info!(item = %line.label(), quantity = line.quantity(), total = %line.line_total(), "In cart");
        }

        let quote = system.checkout.quote(cart).await.map_err(|e| e.to_string())?;
        info!(total = %format_brl(quote), "Quoted");

        let card = CardPayment::new(CardDetails::new("4111 1111 1111 1111", "09/27", "123"));
        system
            .checkout
            .checkout(cart, &customer(), &card)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(
        order_id = %receipt.order_id,
        total = %format_brl(receipt.total),
        status = receipt.status.label(),
        transaction = ?receipt.transaction_id,
        "Card order placed"
    );

    let span = tracing::info_span!("pix_order");
    let pix_result = async {
        let cart = system
            .carts
            .open_cart("demo-session-2")
            .await
            .map_err(|e| e.to_string())?;
        let (pizza, size) = (&menu.pizzas[1], &menu.sizes[2]);
        let price = menu
            .price_of(pizza.id, size.id)
            .ok_or_else(|| format!("{} has no price in {}", pizza.name, size.name))?;
        system
            .carts
            .add_pizza(cart, pizza.clone(), size.clone(), price)
            .await
            .map_err(|e| e.to_string())?;

        let details = system
            .checkout
            .saved_customer()
            .map_err(|e| e.to_string())?
            .unwrap_or_else(customer);
        let receipt = system
            .checkout
            .checkout(cart, &details, &PixPayment)
            .await
            .map_err(|e| e.to_string())?;
        info!(order_id = %receipt.order_id, qr = ?receipt.pix_qr_code, "Waiting for PIX transfer");

        system
            .checkout
            .confirm_pix(receipt.order_id)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;

    match pix_result {
        Ok(Some(order)) => info!(order_id = %order.id, status = order.status.label(), "PIX order confirmed"),
        Ok(None) => error!("PIX order vanished from the mirror"),
        Err(e) => error!(error = %e, "PIX order failed"),
    }

    match system.tracker.orders().await {
        Ok(orders) => {
            for order in orders {
                info!(order_id = %order.id, status = order.status.label(), total = %format_brl(order.total_price), "Order history");
            }
        }
        Err(e) => error!(error = %e, "Could not read order history"),
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
