use crate::backend::{Backend, InProcessBackend};
use crate::checkout::CheckoutService;
use crate::clients::{CartClient, TrackerClient};
use crate::framework::EntityStore;
use crate::lifecycle::config::StorefrontConfig;
use crate::model::{Menu, OrderId};
use crate::notify::{Notifier, TracingNotifier};
use crate::storage::{LocalStorage, SavedUserStore, StorageError, StoredOrderMirror};
use crate::tracker_actor::TrackerContext;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Starts and stops every actor of the storefront.
///
/// # Architecture
///
/// - **Cart actor**: one [`Cart`](crate::model::Cart) per browsing session
/// - **Tracker actor**: the customer's mirrored orders, persisted in local storage,
///   plus their delivery timers
/// - **Backend actors**: customers, orders and payment records
///
/// [`CheckoutService`] holds clients to all of them.
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::start(StorefrontConfig::from_env()?, menu)?;
///
/// let cart = system.carts.open_cart("session-1").await?;
/// system.carts.add_beverage(cart, coke).await?;
/// let receipt = system.checkout.checkout(cart, &details, &CashPayment).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    pub carts: CartClient,
    pub tracker: TrackerClient,
    pub checkout: CheckoutService,
    menu: Menu,
    handles: Vec<JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Starts the storefront with notifications going to the log.
    pub fn start(config: StorefrontConfig, menu: Menu) -> Result<Self, StorageError> {
        Self::start_with_notifier(config, menu, Arc::new(TracingNotifier))
    }

    /// Starts the storefront with customer notifications sent to `notifier`.
    ///
    /// Fails only when the configured storage file exists but can't be read. Orders
    /// already in the mirror are tracked again; their delivery timers are not restarted.
    pub fn start_with_notifier(
        config: StorefrontConfig,
        menu: Menu,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let storage = LocalStorage::from_location(&config.storage)?;
        let mirror = StoredOrderMirror::new(storage.clone());
        // New backend orders must not reuse ids already in the mirror.
        let last_order = mirror
            .list()?
            .iter()
            .map(|order| order.id)
            .max()
            .unwrap_or(OrderId(0));

        // 1. Create actors
        let (cart_actor, cart_client) = crate::cart_actor::new(config.channel_buffer);
        let (tracker_actor, tracker_client) =
            crate::tracker_actor::new(config.channel_buffer, mirror);
        let (backend, mut handles) =
            InProcessBackend::start_after(config.channel_buffer, menu.clone(), last_order);

        // 2. Start them with their context. The tracker's timers get a weak handle back
        //    to the tracker itself.
        let tracker_context =
            TrackerContext::new(notifier.clone(), config.delivery_delay, &tracker_client);
        handles.push(tokio::spawn(cart_actor.run(notifier.clone())));
        handles.push(tokio::spawn(tracker_actor.run(tracker_context)));

        let carts = CartClient::new(cart_client);
        let tracker = TrackerClient::new(tracker_client).with_notifier(notifier.clone());
        let backend: Arc<dyn Backend> = Arc::new(backend);
        let checkout = CheckoutService::new(
            backend,
            carts.clone(),
            tracker.clone(),
            SavedUserStore::new(storage),
            notifier,
            config.delivery_fee,
        );

        info!(
            delivery_fee = %config.delivery_fee,
            delivery_delay_secs = config.delivery_delay.as_secs(),
            storage = ?config.storage,
            "Storefront started"
        );

        Ok(Self {
            carts,
            tracker,
            checkout,
            menu,
            handles,
        })
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Stops every actor.
    ///
    /// Dropping the clients closes the actors' channels; each loop then drains and
    /// exits. Pending delivery timers are aborted with the tracker. Returns `Err` if an
    /// actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.checkout);
        drop(self.carts);
        drop(self.tracker);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
