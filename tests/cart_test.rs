use pizzeria_storefront::clients::CartClient;
use pizzeria_storefront::lifecycle::{StorefrontConfig, StorefrontSystem};
use pizzeria_storefront::model::{
    Beverage, BeverageId, CartAction, CartState, Menu, Pizza, PizzaId, Size, SizeId,
};
use pizzeria_storefront::notify::{NotificationKind, RecordingNotifier};
use rust_decimal::Decimal;
use std::sync::Arc;

fn margherita() -> Pizza {
    Pizza::new(PizzaId(1), "Margherita", "Tomato, mozzarella, basil")
}

fn calabresa() -> Pizza {
    Pizza::new(PizzaId(2), "Calabresa", "Calabresa sausage, onion")
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

fn guarana() -> Beverage {
    Beverage::new(BeverageId(2), "Guaraná", Decimal::new(650, 2))
}

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Scenarios A to E, driven through the cart actor the way the UI does.
#[tokio::test]
async fn test_cart_walkthrough_through_actor() {
    let recorder = RecordingNotifier::new();
    let system = StorefrontSystem::start_with_notifier(
        StorefrontConfig::default(),
        Menu::default(),
        Arc::new(recorder.clone()),
    )
    .expect("Failed to start storefront");
    let carts: &CartClient = &system.carts;
    let cart = carts.open_cart("walkthrough").await.expect("Failed to open cart");

    // A: first pizza
    let state = carts
        .add_pizza(cart, margherita(), medium(), money(1000))
        .await
        .expect("Failed to add pizza");
    assert_eq!(state.len(), 1);
    assert_eq!(state.items()[0].quantity(), 1);
    assert_eq!(state.total_price(), money(1000));

    // B: same pizza and size merges
    let state = carts
        .add_pizza(cart, margherita(), medium(), money(1000))
        .await
        .expect("Failed to add pizza");
    assert_eq!(state.len(), 1);
    assert_eq!(state.items()[0].quantity(), 2);
    assert_eq!(state.total_price(), money(2000));

    // C: a beverage gets its own line
    let state = carts.add_beverage(cart, coke()).await.expect("Failed to add beverage");
    assert_eq!(state.len(), 2);
    assert_eq!(state.total_price(), money(2500));

    // D: three pizzas
    let state = carts
        .update_quantity(cart, 0, 3)
        .await
        .expect("Failed to update quantity");
    assert_eq!(state.items()[0].quantity(), 3);
    assert_eq!(state.total_price(), money(3500));

    // E: drop the beverage
    let state = carts.remove_item(cart, 1).await.expect("Failed to remove item");
    assert_eq!(state.len(), 1);
    assert_eq!(state.total_price(), money(3000));

    assert_eq!(
        carts.snapshot(cart).await.expect("Failed to read cart"),
        state
    );

    let added: Vec<_> = recorder
        .notifications()
        .into_iter()
        .filter(|n| n.kind == NotificationKind::Success)
        .map(|n| n.message)
        .collect();
    assert_eq!(
        added,
        [
            "Margherita added to your cart",
            "Margherita added to your cart",
            "Coke added to your cart",
        ]
    );

    system.shutdown().await.expect("Failed to shut down");
}

#[test]
fn test_merge_law() {
    let once = CartState::new().add_beverage(coke());
    let twice = CartState::new()
        .add_pizza(margherita(), medium(), money(1000))
        .add_pizza(margherita(), medium(), money(1000));

    assert_eq!(twice.len(), 1);
    assert_eq!(twice.items()[0].quantity(), 2);
    assert_eq!(twice.total_price(), money(2000));

    // Same pizza in another size is another line.
    let split = twice.add_pizza(margherita(), large(), money(1400));
    assert_eq!(split.len(), 2);

    let beverages = once.add_beverage(coke());
    assert_eq!(beverages.len(), 1);
    assert_eq!(beverages.total_price(), money(1000));
}

#[test]
fn test_boundaries_are_no_ops() {
    let state = CartState::new()
        .add_pizza(margherita(), medium(), money(1000))
        .add_beverage(coke());

    assert_eq!(state.clone().update_quantity(0, 0), state);
    assert_eq!(state.clone().update_quantity(0, -1), state);
    assert_eq!(state.clone().update_quantity(2, 4), state);
    assert_eq!(state.clone().update_quantity(-1, 4), state);
    assert_eq!(state.clone().remove_item(-1), state);
    assert_eq!(state.clone().remove_item(state.len() as isize), state);
}

#[test]
fn test_update_to_current_quantity_is_idempotent() {
    let state = CartState::new()
        .add_pizza(calabresa(), large(), money(4200))
        .add_pizza(calabresa(), large(), money(4200))
        .add_beverage(guarana());

    for (i, line) in state.items().iter().enumerate() {
        let same = state
            .clone()
            .update_quantity(i as isize, i64::from(line.quantity()));
        assert_eq!(same, state);
    }
}

#[test]
fn test_clear_empties_everything() {
    let state = CartState::new()
        .add_pizza(margherita(), medium(), money(1000))
        .add_beverage(coke())
        .clear();
    assert!(state.is_empty());
    assert_eq!(state.total_price(), Decimal::ZERO);
    assert_eq!(state, CartState::default());
}

/// Small deterministic generator so failures reproduce.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

fn random_action(rng: &mut Lcg, len: usize) -> CartAction {
    let pizzas = [margherita(), calabresa()];
    let sizes = [medium(), large()];
    let beverages = [coke(), guarana()];
    // Indices may point one or two past the end, or below zero.
    let index = rng.next(len as u64 + 3) as isize - 1;
    match rng.next(10) {
        0..=2 => CartAction::AddPizza {
            pizza: pizzas[rng.next(2) as usize].clone(),
            size: sizes[rng.next(2) as usize].clone(),
            price: money(799 + rng.next(4000) as i64),
        },
        3..=4 => CartAction::AddBeverage {
            beverage: beverages[rng.next(2) as usize].clone(),
        },
        5..=6 => CartAction::UpdateQuantity {
            index,
            quantity: rng.next(7) as i64 - 2,
        },
        7..=8 => CartAction::RemoveItem { index },
        _ => CartAction::Clear,
    }
}

/// The maintained total matches a full recomputation after every step, quantities stay
/// positive and no product appears twice.
#[test]
fn test_total_invariant_over_random_sequences() {
    for seed in 0..200 {
        let mut rng = Lcg(seed);
        let mut state = CartState::new();
        for _ in 0..60 {
            let action = random_action(&mut rng, state.len());
            state = state.apply(action.clone());

            assert_eq!(
                state.total_price(),
                state.recomputed_total(),
                "seed {seed}, after {action:?}"
            );
            assert!(state.items().iter().all(|line| line.quantity() >= 1));

            let labels: Vec<_> = state.items().iter().map(|line| line.label()).collect();
            let mut unique = labels.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), labels.len(), "duplicate line, seed {seed}");
        }
    }
}
