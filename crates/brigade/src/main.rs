//! Walks one order from checkout to the last plate served.
//!
//! ```bash
//! RUST_LOG=info cargo run -p brigade
//! RUST_LOG=info cargo run -p brigade -- brigade.toml
//! ```

use brigade::config::{load_config, BrigadeConfig};
use brigade::lifecycle::BrigadeSystem;
use brigade::model::{
    CartItem, CookStatus, CustomerInfo, DishId, RestaurantCreate, Role, WaiterStatus,
};
use brigade::notify::ChannelNotifier;
use brigade::session::Session;
use resource_actor::tracing::setup_tracing;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path).map_err(|e| e.to_string())?,
        None => BrigadeConfig::default(),
    };

    let (notifier, mut notifications) = ChannelNotifier::new();
    let mut system = BrigadeSystem::new(&config, Arc::new(notifier));

    let restaurant_id = system
        .restaurant_client
        .open_restaurant(RestaurantCreate {
            name: "Trattoria Due".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;
    system
        .start_reconciler(restaurant_id)
        .await
        .map_err(|e| e.to_string())?;

    let manager = Session::manager(restaurant_id);
    let service = system.service.clone();
    let mut cooks = Vec::new();
    for name in ["Marco", "Giulia"] {
        let cook = service
            .hire_staff(&manager, name.to_string(), Role::Cook)
            .await
            .map_err(|e| e.to_string())?;
        cooks.push(cook);
    }
    let waiter = service
        .hire_staff(&manager, "Luca".to_string(), Role::Waiter)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("checkout");
    let order = async {
        service
            .submit_order(
                restaurant_id,
                CustomerInfo::named("Ada"),
                4,
                vec![
                    CartItem::new(DishId(1), "Margherita", 2, Decimal::new(850, 2)),
                    CartItem::new(DishId(2), "Tiramisu", 1, Decimal::new(600, 2)),
                    CartItem::new(DishId(3), "Espresso", 2, Decimal::new(250, 2)),
                ],
                Some("no nuts".to_string()),
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(order_id = %order.id, total = %order.total, "Order placed");

    for item in &order.items {
        let cook = cooks
            .iter()
            .find(|cook| Some(cook.id) == item.assigned_cook_id)
            .ok_or_else(|| format!("{} has no cook", item.key))?;
        let cook_session = Session::staff(cook);
        for next in [CookStatus::Preparing, CookStatus::Completed] {
            service
                .advance_cook_status(&cook_session, order.id, item.key, next)
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    let waiter_session = Session::staff(&waiter);
    let queue = service
        .work_queue(&waiter_session)
        .await
        .map_err(|e| e.to_string())?;
    for work in queue {
        for next in [WaiterStatus::Accepted, WaiterStatus::Served] {
            service
                .advance_waiter_status(&waiter_session, work.order_id, work.key, next)
                .await
                .map_err(|e| e.to_string())?;
        }
    }

    let order = service
        .get_order(order.id)
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %order.id, status = %order.status, "Order finished");

    while let Ok(notification) = notifications.try_recv() {
        info!(
            title = %notification.title,
            tag = %notification.options.tag,
            "{}",
            notification.options.body
        );
    }

    drop(service);
    system.shutdown().await?;
    Ok(())
}
