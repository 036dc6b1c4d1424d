#![allow(dead_code)]

use brigade::config::BrigadeConfig;
use brigade::lifecycle::BrigadeSystem;
use brigade::model::{
    CartItem, CustomerInfo, DishId, Order, RestaurantCreate, RestaurantId, Role, Staff,
};
use brigade::notify::{ChannelNotifier, Notification};
use brigade::session::Session;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// A running system with one restaurant.
pub struct Kitchen {
    pub system: BrigadeSystem,
    pub restaurant_id: RestaurantId,
    pub manager: Session,
    pub notifications: UnboundedReceiver<Notification>,
}

impl Kitchen {
    pub async fn open() -> Self {
        let (notifier, notifications) = ChannelNotifier::new();
        let system = BrigadeSystem::new(&BrigadeConfig::default(), Arc::new(notifier));
        let restaurant_id = system
            .restaurant_client
            .open_restaurant(RestaurantCreate {
                name: "Test Kitchen".to_string(),
            })
            .await
            .unwrap();
        Self {
            system,
            restaurant_id,
            manager: Session::manager(restaurant_id),
            notifications,
        }
    }

    pub async fn hire(&self, name: &str, role: Role) -> Staff {
        self.system
            .service
            .hire_staff(&self.manager, name.to_string(), role)
            .await
            .unwrap()
    }

    /// Submits one order with an item per dish name, priced 5.00 each.
    pub async fn submit(&self, dishes: &[&str]) -> Order {
        let cart = dishes
            .iter()
            .enumerate()
            .map(|(i, name)| CartItem::new(DishId(i as u32 + 1), *name, 1, Decimal::new(500, 2)))
            .collect();
        self.system
            .service
            .submit_order(self.restaurant_id, CustomerInfo::named("Ada"), 7, cart, None)
            .await
            .unwrap()
    }

    /// Drains every notification delivered so far.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut delivered = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            delivered.push(notification);
        }
        delivered
    }

    pub async fn shutdown(self) {
        self.system.shutdown().await.unwrap();
    }
}
