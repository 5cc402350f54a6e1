use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::clock::SharedClock;
use crate::config::Config;
use crate::service::OrderService;
use crate::sweeper::{ExpirySweeper, SweeperHandle};
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("{task} task failed: {source}")]
    TaskFailed {
        task: &'static str,
        #[source]
        source: JoinError,
    },
}

/// The running order system.
///
/// # Wiring
///
/// - **User Actor**: directory of buyers and sellers
/// - **Product Actor**: catalogue and inventory ledger
/// - **Order Actor**: orders and their transitions, with the clock as context
/// - **Order Service**: create, deliver, cancel over the three clients
/// - **Expiry Sweeper**: periodic reclamation, started by [`OrderSystem::start_sweeper`]
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(&config, Arc::new(SystemClock));
/// system.start_sweeper();
/// let order = system.service.create_order(buyer, seller, product, 2).await?;
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub service: OrderService,
    /// The sweeper, for running single sweeps directly.
    pub sweeper: ExpirySweeper,

    sweeper_handle: Option<SweeperHandle>,
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl OrderSystem {
    /// Spawns the actors and builds the service and sweeper. The periodic
    /// sweep is not running until [`OrderSystem::start_sweeper`].
    pub fn new(config: &Config, clock: SharedClock) -> Self {
        // 1. Create actors
        let (user_actor, user_client) = crate::user_actor::new(config.actor_buffer);
        let (product_actor, product_client) = crate::product_actor::new(config.actor_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.actor_buffer);

        // 2. Start actors with injected context
        let handles = vec![
            ("user", tokio::spawn(user_actor.run(()))),
            ("product", tokio::spawn(product_actor.run(()))),
            ("order", tokio::spawn(order_actor.run(clock.clone()))),
        ];

        let service = OrderService::new(
            user_client.clone(),
            product_client.clone(),
            order_client.clone(),
            clock.clone(),
        );
        let sweeper = ExpirySweeper::new(
            order_client.clone(),
            product_client.clone(),
            clock,
            config.sweep_interval,
            config.order_expiry,
        );

        info!(
            sweep_interval_secs = config.sweep_interval.as_secs(),
            order_expiry_secs = config.order_expiry.as_secs(),
            "Order system started"
        );

        Self {
            user_client,
            product_client,
            order_client,
            service,
            sweeper,
            sweeper_handle: None,
            handles,
        }
    }

    /// Starts the periodic sweep. Calling it again while it runs does nothing.
    pub fn start_sweeper(&mut self) {
        if self.sweeper_handle.is_some() {
            warn!("Expiry sweeper already running");
            return;
        }
        self.sweeper_handle = Some(self.sweeper.clone().spawn());
    }

    /// Stops the sweeper, closes every actor channel and waits for the actor
    /// tasks to drain.
    ///
    /// Clones of the clients or the service held elsewhere (an HTTP router,
    /// for instance) keep their actors alive; drop them first.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down order system...");

        if let Some(sweeper) = self.sweeper_handle {
            sweeper
                .shutdown()
                .await
                .map_err(|source| ShutdownError::TaskFailed {
                    task: "sweeper",
                    source,
                })?;
        }

        drop(self.sweeper);
        drop(self.service);
        drop(self.order_client);
        drop(self.product_client);
        drop(self.user_client);

        for (task, handle) in self.handles {
            if let Err(source) = handle.await {
                error!(task, error = %source, "Actor task failed");
                return Err(ShutdownError::TaskFailed { task, source });
            }
        }

        info!("Order system shutdown complete");
        Ok(())
    }
}
