//! Per-staff counts of open line items.

use crate::clients::{OrderClient, RestaurantClient, StaffClient};
use crate::model::{Order, RestaurantId, Role, Staff, StaffId};
use crate::order_actor::OrderError;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Staff ID to open item count. Iteration order is staff ID order, which is the tie-break
/// order of the planner.
pub type LoadMap = BTreeMap<StaffId, u32>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffLoad {
    pub cook_load: LoadMap,
    pub waiter_load: LoadMap,
}

impl StaffLoad {
    /// Counts, for every given cook and waiter, the items assigned to them in `orders`.
    ///
    /// Every listed staff member gets an entry, starting at 0. Completed orders and items
    /// assigned to someone not in the list (a deactivated member) are skipped.
    pub fn build(cooks: &[Staff], waiters: &[Staff], orders: &[Order]) -> Self {
        let mut cook_load: LoadMap = cooks.iter().map(|staff| (staff.id, 0)).collect();
        let mut waiter_load: LoadMap = waiters.iter().map(|staff| (staff.id, 0)).collect();

        for order in orders.iter().filter(|order| order.is_open()) {
            for item in &order.items {
                bump(&mut cook_load, item.assigned_cook_id);
                bump(&mut waiter_load, item.assigned_waiter_id);
            }
        }

        Self {
            cook_load,
            waiter_load,
        }
    }

    pub fn for_role(&self, role: Role) -> &LoadMap {
        match role {
            Role::Cook => &self.cook_load,
            Role::Waiter => &self.waiter_load,
        }
    }
}

fn bump(load: &mut LoadMap, assignee: Option<StaffId>) {
    let Some(id) = assignee else { return };
    if let Some(count) = load.get_mut(&id) {
        *count += 1;
    }
}

/// Builds [`StaffLoad`] snapshots from the live stores. Read-only.
#[derive(Clone)]
pub struct WorkloadIndex {
    restaurants: RestaurantClient,
    staff: StaffClient,
    orders: OrderClient,
}

impl WorkloadIndex {
    pub fn new(restaurants: RestaurantClient, staff: StaffClient, orders: OrderClient) -> Self {
        Self {
            restaurants,
            staff,
            orders,
        }
    }

    #[instrument(skip(self))]
    pub async fn compute_load(&self, restaurant_id: RestaurantId) -> Result<StaffLoad, OrderError> {
        self.restaurants.ensure_exists(restaurant_id).await?;

        let cooks = self.staff.active_staff(restaurant_id, Role::Cook).await?;
        let waiters = self.staff.active_staff(restaurant_id, Role::Waiter).await?;
        let open_orders = self.orders.open_orders(restaurant_id).await?;

        let load = StaffLoad::build(&cooks, &waiters, &open_orders);
        debug!(
            cooks = load.cook_load.len(),
            waiters = load.waiter_load.len(),
            open_orders = open_orders.len(),
            "Computed load"
        );
        Ok(load)
    }
}
