/// A cook or waiter employed by a restaurant.
///
/// Staff are never deleted: a deactivated member keeps their ID so historical line item
/// assignments still resolve, but drops out of workload balancing.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait.
/// See [`crate::staff_actor`] for the `Deactivate` / `Reactivate` actions.
use crate::model::RestaurantId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Staff members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StaffId(pub u32);

impl From<u32> for StaffId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StaffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "staff_{}", self.0)
    }
}

/// The kitchen role a staff member is assigned work for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Cook,
    Waiter,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Cook => write!(f, "cook"),
            Role::Waiter => write!(f, "waiter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub role: Role,
    pub active: bool,
}

impl Staff {
    /// Creates an active staff member.
    pub fn new(id: StaffId, restaurant_id: RestaurantId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            restaurant_id,
            name: name.into(),
            role,
            active: true,
        }
    }
}

/// Payload for hiring a staff member.
#[derive(Debug, Clone)]
pub struct StaffCreate {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUpdate {
    pub name: Option<String>,
}

/// Selects staff of one restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffFilter {
    pub restaurant_id: RestaurantId,
    pub role: Option<Role>,
    pub active_only: bool,
}

impl StaffFilter {
    /// Active staff of `role` at `restaurant_id`.
    pub fn active(restaurant_id: RestaurantId, role: Role) -> Self {
        Self {
            restaurant_id,
            role: Some(role),
            active_only: true,
        }
    }

    /// Everyone ever hired at `restaurant_id`.
    pub fn roster(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id,
            role: None,
            active_only: false,
        }
    }

    pub fn accepts(&self, staff: &Staff) -> bool {
        staff.restaurant_id == self.restaurant_id
            && self.role.is_none_or(|role| role == staff.role)
            && (!self.active_only || staff.active)
    }
}
