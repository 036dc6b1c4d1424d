//! Background promotion of order statuses.
//!
//! The service already reconciles inside every write it makes. The reconciler covers writes
//! that bypass it (a raw `OrderClient::revise`, a future import path) by watching a
//! restaurant's change feed and promoting any order whose stored status lags behind its items.

use crate::model::{Order, RestaurantId};
use crate::order_actor::OrderError;
use crate::service::OrderService;
use crate::state_machine::order::derive_status;
use resource_actor::Subscription;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

pub struct StatusReconciler {
    service: OrderService,
    restaurant_id: RestaurantId,
    subscription: Subscription<Order>,
    shutdown: CancellationToken,
}

impl StatusReconciler {
    /// Subscribes to the restaurant's orders. Changes committed after this returns are seen.
    pub async fn new(
        service: OrderService,
        restaurant_id: RestaurantId,
        shutdown: CancellationToken,
    ) -> Result<Self, OrderError> {
        let subscription = service.watch_restaurant(restaurant_id).await?;
        Ok(Self {
            service,
            restaurant_id,
            subscription,
            shutdown,
        })
    }

    /// Subscribes, then runs the loop on its own task until `shutdown` is cancelled.
    pub async fn spawn(
        service: OrderService,
        restaurant_id: RestaurantId,
        shutdown: CancellationToken,
    ) -> Result<JoinHandle<()>, OrderError> {
        let reconciler = Self::new(service, restaurant_id, shutdown).await?;
        Ok(tokio::spawn(reconciler.run()))
    }

    pub async fn run(mut self) {
        info!(restaurant_id = %self.restaurant_id, "Status reconciler started");

        loop {
            let change = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                change = self.subscription.recv() => change,
            };
            let Some(change) = change else {
                warn!(restaurant_id = %self.restaurant_id, "Order feed closed");
                break;
            };

            let order = &change.record.entity;
            if derive_status(order) == order.status {
                continue;
            }
            if let Err(e) = self.service.reconcile_order(order.id).await {
                error!(order_id = %order.id, "Failed to reconcile order status: {e}");
            }
        }

        let restaurant_id = self.restaurant_id;
        if let Err(e) = self.subscription.unsubscribe().await {
            debug!(%restaurant_id, "Unsubscribe skipped: {e}");
        }
        info!(%restaurant_id, "Status reconciler stopped");
    }
}
