use crate::clients::{BatchClient, DeliveryClient, ItemClient, RiderClient};
use crate::clock::SharedClock;
use crate::config::WarehouseConfig;
use crate::services::DispatchService;
use tracing::{error, info};

/// The running warehouse: four resource actors and the service that coordinates them.
///
/// # Example
///
/// ```ignore
/// let system = WarehouseSystem::new(WarehouseConfig::from_env()?, Arc::new(SystemClock));
///
/// let riders = system.dispatch.upload_riders(roster).await?;
/// let outcome = system.dispatch.dispatch_delivery_tasks(&tasks, &riders).await?;
///
/// system.shutdown().await?;
/// ```
pub struct WarehouseSystem {
    pub item_client: ItemClient,
    pub rider_client: RiderClient,
    pub delivery_client: DeliveryClient,
    pub batch_client: BatchClient,

    /// Uploads, dispatch, pickups and the rider workflow.
    pub dispatch: DispatchService,

    pub config: WarehouseConfig,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl WarehouseSystem {
    /// Spawns every actor. Must be called inside a Tokio runtime.
    pub fn new(config: WarehouseConfig, clock: SharedClock) -> Self {
        let buffer = config.actor_buffer;

        // 1. Create actors (no dependencies)
        let (item_actor, item_client) = crate::item_actor::new(buffer);
        let (rider_actor, rider_client) = crate::rider_actor::new(buffer);
        let (delivery_actor, delivery_client) = crate::delivery_actor::new(buffer);
        let (batch_actor, batch_client) = crate::batch_actor::new(buffer);

        // 2. Start actors with injected context
        let item_handle = tokio::spawn(item_actor.run(clock.clone()));
        let rider_handle = tokio::spawn(rider_actor.run(()));
        let delivery_handle = tokio::spawn(delivery_actor.run(item_client.clone()));
        let batch_handle = tokio::spawn(batch_actor.run(()));

        let dispatch = DispatchService::new(
            item_client.clone(),
            rider_client.clone(),
            delivery_client.clone(),
            batch_client.clone(),
            config.clone(),
            clock,
        );

        info!(buffer, "Warehouse system started");
        Self {
            item_client,
            rider_client,
            delivery_client,
            batch_client,
            dispatch,
            config,
            handles: vec![item_handle, rider_handle, delivery_handle, batch_handle],
        }
    }

    /// Drops every client and waits for the actors to stop.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down warehouse system...");

        drop(self.dispatch);
        drop(self.batch_client);
        drop(self.delivery_client);
        drop(self.rider_client);
        drop(self.item_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Warehouse system shutdown complete.");
        Ok(())
    }
}
