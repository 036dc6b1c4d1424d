//! Explicit caller context for staff operations.
//!
//! Every operation that acts on behalf of someone takes a [`Session`]: which restaurant they
//! work at, and whether they are a manager or a cook/waiter. Cooks and waiters may only move
//! the track of items assigned to them; managers may move anything in their restaurant.

use crate::model::{LineItem, RestaurantId, Role, Staff, StaffId};
use crate::order_actor::OrderError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    Manager,
    Staff { staff_id: StaffId, role: Role },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub restaurant_id: RestaurantId,
    pub principal: Principal,
}

impl Session {
    pub fn manager(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id,
            principal: Principal::Manager,
        }
    }

    pub fn staff(staff: &Staff) -> Self {
        Self {
            restaurant_id: staff.restaurant_id,
            principal: Principal::Staff {
                staff_id: staff.id,
                role: staff.role,
            },
        }
    }

    pub fn staff_id(&self) -> Option<StaffId> {
        match self.principal {
            Principal::Manager => None,
            Principal::Staff { staff_id, .. } => Some(staff_id),
        }
    }

    pub fn check_restaurant(&self, restaurant_id: RestaurantId) -> Result<(), OrderError> {
        if self.restaurant_id != restaurant_id {
            return Err(OrderError::ValidationError(format!(
                "session for {} cannot act on {}",
                self.restaurant_id, restaurant_id
            )));
        }
        Ok(())
    }

    pub fn require_manager(&self) -> Result<(), OrderError> {
        match self.principal {
            Principal::Manager => Ok(()),
            Principal::Staff { staff_id, .. } => Err(OrderError::ValidationError(format!(
                "{staff_id} is not a manager"
            ))),
        }
    }

    /// Whether this session may move the `role` track of `item`.
    pub fn check_item(&self, item: &LineItem, role: Role) -> Result<(), OrderError> {
        let Principal::Staff {
            staff_id,
            role: own_role,
        } = self.principal
        else {
            return Ok(());
        };
        let assignee = match role {
            Role::Cook => item.assigned_cook_id,
            Role::Waiter => item.assigned_waiter_id,
        };
        if own_role != role || assignee != Some(staff_id) {
            return Err(OrderError::ValidationError(format!(
                "{} is not the assigned {} of {}",
                staff_id, role, item.key
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CookStatus, DishId, LineItemKey, WaiterStatus};
    use rust_decimal::Decimal;

    fn item(cook: Option<u32>, waiter: Option<u32>) -> LineItem {
        LineItem {
            key: LineItemKey(0),
            dish_id: DishId(1),
            name: "Tacos".into(),
            quantity: 2,
            unit_price: Decimal::new(350, 2),
            assigned_cook_id: cook.map(StaffId),
            assigned_waiter_id: waiter.map(StaffId),
            cook_status: CookStatus::Pending,
            waiter_status: WaiterStatus::Pending,
        }
    }

    #[test]
    fn assigned_cook_may_work_item() {
        let cook = Staff::new(StaffId(1), RestaurantId(1), "Remy", Role::Cook);
        let session = Session::staff(&cook);
        assert!(session.check_item(&item(Some(1), Some(2)), Role::Cook).is_ok());
    }

    #[test]
    fn other_staff_and_other_roles_are_rejected() {
        let cook = Staff::new(StaffId(1), RestaurantId(1), "Remy", Role::Cook);
        let session = Session::staff(&cook);
        assert!(session.check_item(&item(Some(3), Some(2)), Role::Cook).is_err());
        // Right person, wrong track
        assert!(session.check_item(&item(Some(1), Some(1)), Role::Waiter).is_err());
        assert!(session.check_item(&item(None, None), Role::Cook).is_err());
    }

    #[test]
    fn manager_may_work_any_item_but_only_at_home() {
        let session = Session::manager(RestaurantId(1));
        assert!(session.check_item(&item(None, None), Role::Waiter).is_ok());
        assert!(session.require_manager().is_ok());
        assert!(session.check_restaurant(RestaurantId(1)).is_ok());
        assert!(matches!(
            session.check_restaurant(RestaurantId(2)),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn principal_serializes_tagged() {
        let json = serde_json::to_value(Principal::Staff {
            staff_id: StaffId(4),
            role: Role::Waiter,
        })
        .unwrap();
        assert_eq!(json["kind"], "staff");
        assert_eq!(json["role"], "waiter");
    }
}
