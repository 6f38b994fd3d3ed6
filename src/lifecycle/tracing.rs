//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the `tracing-subscriber` formatter for the whole storefront.
//! Log lines are compact and leave out the module path (`with_target(false)`); the actor
//! loop names the entity (`entity_type="Cart"`) instead.
//!
//! ## Levels
//!
//! - `info`: actor start/stop, orders created, status changes, checkout results
//! - `debug`: every request with its payload, ignored cart edits, timer scheduling
//! - `warn`: refused payments, orders missing from the mirror, failed actions
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run
//! RUST_LOG=pizzeria_storefront::tracker_actor=debug cargo run
//! ```
//!
//! ## A checkout at `info`
//!
//! ```text
//! INFO Created entity_type="Cart" id=cart_1 size=1
//! INFO checkout{cart=CartId(1) method=credit_card}: Order created order_id=order_1 total=23.99 status=payment_pending
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Order status changed id=order_1 from=payment_pending to=in_transit
//! INFO checkout{cart=CartId(1) method=credit_card}: Checkout complete order_id=order_1 status=in_transit
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins; without it the level is `info`.
///
/// Calling it again (several tests in one binary) is harmless.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
