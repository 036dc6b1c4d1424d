//! # System Lifecycle
//!
//! [`BrigadeSystem`] creates the three record actors, wires them together, and builds the
//! [`OrderService`] on top of their clients.
//!
//! ## Wiring
//!
//! Actors are created without dependencies and receive them when started:
//!
//! - Restaurant actor: `Context = ()`
//! - Staff actor: `Context = RestaurantClient`
//! - Order actor: `Context = RestaurantClient`
//!
//! The graph is acyclic, so each actor stops once every client of its own channel is dropped.
//!
//! ## Shutdown
//!
//! 1. Cancel the reconcilers and wait for them to unsubscribe.
//! 2. Drop the service and the clients, closing the request channels.
//! 3. Await every actor task.
//!
//! Clones of the service or a client held elsewhere keep their actor alive, so drop them
//! before calling [`BrigadeSystem::shutdown`].

use crate::clients::{OrderClient, RestaurantClient, StaffClient};
use crate::config::BrigadeConfig;
use crate::model::RestaurantId;
use crate::notify::{NotificationPublisher, Notifier, TracingNotifier};
use crate::order_actor::OrderError;
use crate::reconciler::StatusReconciler;
use crate::retry::RetryPolicy;
use crate::service::OrderService;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

pub struct BrigadeSystem {
    pub restaurant_client: RestaurantClient,
    pub staff_client: StaffClient,
    pub order_client: OrderClient,
    pub service: OrderService,

    shutdown: CancellationToken,
    reconcilers: Vec<JoinHandle<()>>,
    handles: Vec<JoinHandle<()>>,
}

impl BrigadeSystem {
    /// Starts every actor with the given configuration and notification sink.
    pub fn new(config: &BrigadeConfig, notifier: Arc<dyn Notifier>) -> Self {
        let buffer = config.store.channel_buffer.max(1);

        // 1. Create actors (no dependencies)
        let (restaurant_actor, restaurant_client) = crate::restaurant_actor::new(buffer);
        let (staff_actor, staff_client) = crate::staff_actor::new(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);

        // 2. Start actors with injected context
        let restaurant_handle = tokio::spawn(restaurant_actor.run(()));
        let staff_handle = tokio::spawn(staff_actor.run(restaurant_client.clone()));
        let order_handle = tokio::spawn(order_actor.run(restaurant_client.clone()));

        let service = OrderService::new(
            restaurant_client.clone(),
            staff_client.clone(),
            order_client.clone(),
            RetryPolicy::from(&config.retry),
            NotificationPublisher::new(notifier, &config.notifications),
        );

        info!(buffer, "Brigade system started");
        Self {
            restaurant_client,
            staff_client,
            order_client,
            service,
            shutdown: CancellationToken::new(),
            reconcilers: Vec::new(),
            handles: vec![restaurant_handle, staff_handle, order_handle],
        }
    }

    /// Default configuration, notifications written to the log.
    pub fn with_defaults() -> Self {
        Self::new(&BrigadeConfig::default(), Arc::new(TracingNotifier))
    }

    /// Starts a [`StatusReconciler`] for one restaurant, stopped by [`Self::shutdown`].
    pub async fn start_reconciler(&mut self, restaurant_id: RestaurantId) -> Result<(), OrderError> {
        let handle = StatusReconciler::spawn(
            self.service.clone(),
            restaurant_id,
            self.shutdown.child_token(),
        )
        .await?;
        self.reconcilers.push(handle);
        Ok(())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down brigade system...");

        self.shutdown.cancel();
        for handle in self.reconcilers {
            if let Err(e) = handle.await {
                error!("Reconciler task failed: {:?}", e);
                return Err(format!("Reconciler task failed: {:?}", e));
            }
        }

        drop(self.service);
        drop(self.order_client);
        drop(self.staff_client);
        drop(self.restaurant_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Brigade system shutdown complete.");
        Ok(())
    }
}
