use crate::actor::KitchenActor;
use crate::clients::KitchenClient;
use crate::config::KitchenConfig;
use crate::events::ActionLog;
use crate::freshness::{Clock, SystemClock};
use crate::manager::{KitchenError, OrderManager};
use crate::model::{Action, Order};
use crate::scheduler::Scheduler;
use std::sync::Arc;
use tracing::{error, info};

/// Request queue depth of the kitchen actor.
pub const KITCHEN_BUFFER_SIZE: usize = 64;

/// The running kitchen.
///
/// `KitchenSystem` is responsible for:
/// - **Wiring**: building the storage, tracker, policy and action log from a [`KitchenConfig`]
/// - **Lifecycle**: spawning the kitchen actor and stopping it again
///
/// # Example
///
/// ```ignore
/// let system = KitchenSystem::new(KitchenConfig::default())?;
/// let history = system.run(orders).await?;
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Handle for talking to the kitchen directly.
    pub client: KitchenClient,
    config: KitchenConfig,
    handle: tokio::task::JoinHandle<()>,
}

impl KitchenSystem {
    /// Validates `config` and starts the kitchen on the wall clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: KitchenConfig) -> Result<Self, KitchenError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Same as [`KitchenSystem::new`] with an explicit time source.
    pub fn with_clock(config: KitchenConfig, clock: Arc<dyn Clock>) -> Result<Self, KitchenError> {
        let manager = OrderManager::from_config(&config, Arc::new(ActionLog::new()), clock)?;
        let (actor, client) = KitchenActor::new(KITCHEN_BUFFER_SIZE, manager);
        let handle = tokio::spawn(actor.run());

        info!(
            heater = config.heater_capacity,
            cooler = config.cooler_capacity,
            shelf = config.shelf_capacity,
            strategy = %config.discard_strategy,
            "Kitchen started"
        );

        Ok(Self { client, config, handle })
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Feeds `orders` through a [`Scheduler`] and returns the full history.
    pub async fn run(&self, orders: Vec<Order>) -> Result<Vec<Action>, KitchenError> {
        Scheduler::from_config(self.client.clone(), &self.config)
            .run(orders)
            .await
    }

    /// Closes the request channel and waits for the actor to stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down kitchen...");

        // The actor exits once the last sender is gone.
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Kitchen actor failed: {:?}", e);
            return Err(format!("Kitchen actor failed: {:?}", e));
        }

        info!("Kitchen shutdown complete.");
        Ok(())
    }
}
