/// A customer order: line items fanned out to cooks and waiters.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](resource_actor::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`crate::order_actor`] for details on:
/// - Creation parameters ([`OrderDraft`])
/// - Update parameters ([`OrderRevision`])
/// - Query filters ([`OrderFilter`])
use crate::model::{CookStatus, OrderStatus, RestaurantId, StaffId, WaiterStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Position of a line item within its order, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineItemKey(pub usize);

impl Display for LineItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// Menu reference of a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DishId(pub u32);

impl Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dish_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: Option<String>,
}

impl CustomerInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: None,
        }
    }
}

/// One dish as the customer put it in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub dish_id: DishId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl CartItem {
    pub fn new(dish_id: DishId, name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            dish_id,
            name: name.into(),
            quantity,
            unit_price,
        }
    }
}

/// A cart item with the cook and waiter chosen for it.
///
/// `None` means no active staff of that role existed when the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedLineItem {
    pub item: CartItem,
    pub assigned_cook_id: Option<StaffId>,
    pub assigned_waiter_id: Option<StaffId>,
}

impl AssignedLineItem {
    pub fn unassigned(item: CartItem) -> Self {
        Self {
            item,
            assigned_cook_id: None,
            assigned_waiter_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub key: LineItemKey,
    pub dish_id: DishId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub assigned_cook_id: Option<StaffId>,
    pub assigned_waiter_id: Option<StaffId>,
    pub cook_status: CookStatus,
    pub waiter_status: WaiterStatus,
}

impl LineItem {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    /// Both sides finished: cooked and served.
    pub fn is_done(&self) -> bool {
        crate::state_machine::item::is_done(self.cook_status, self.waiter_status)
    }

    pub fn progress(&self) -> ItemProgress {
        ItemProgress {
            cook: self.cook_status,
            waiter: self.waiter_status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub restaurant_id: RestaurantId,
    pub customer: CustomerInfo,
    pub table_number: u32,
    pub ordered_at: DateTime<Utc>,
    pub items: Vec<LineItem>,
    /// Sum of `unit_price * quantity` at creation. Never recomputed.
    pub total: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
}

impl Order {
    pub fn item(&self, key: LineItemKey) -> Option<&LineItem> {
        self.items.get(key.0)
    }

    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn all_items_done(&self) -> bool {
        self.items.iter().all(LineItem::is_done)
    }

    /// The mutable part of this order, as written back by staff actions.
    pub fn revision(&self) -> OrderRevision {
        OrderRevision {
            items: self.items.iter().map(LineItem::progress).collect(),
            status: self.status,
        }
    }
}

/// Payload for creating an order. Items arrive already assigned.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub restaurant_id: RestaurantId,
    pub customer: CustomerInfo,
    pub table_number: u32,
    pub ordered_at: DateTime<Utc>,
    pub items: Vec<AssignedLineItem>,
    pub notes: Option<String>,
}

/// Both progress tracks of one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProgress {
    pub cook: CookStatus,
    pub waiter: WaiterStatus,
}

/// Full replacement of an order's mutable state, one entry per line item.
///
/// Identity fields (dishes, prices, assignments, total) are not part of a revision and can
/// never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRevision {
    pub items: Vec<ItemProgress>,
    pub status: OrderStatus,
}

/// Selects orders for list queries and change feeds.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
    /// A single order.
    Order(OrderId),
    /// Orders of one restaurant, optionally excluding completed ones.
    Restaurant {
        restaurant_id: RestaurantId,
        open_only: bool,
    },
    /// Orders with at least one item assigned to `staff_id`, as cook or waiter.
    AssignedTo { staff_id: StaffId, open_only: bool },
}

impl OrderFilter {
    pub fn open_at(restaurant_id: RestaurantId) -> Self {
        OrderFilter::Restaurant {
            restaurant_id,
            open_only: true,
        }
    }

    pub fn accepts(&self, order: &Order) -> bool {
        match self {
            OrderFilter::Order(id) => order.id == *id,
            OrderFilter::Restaurant {
                restaurant_id,
                open_only,
            } => order.restaurant_id == *restaurant_id && (!open_only || order.is_open()),
            OrderFilter::AssignedTo {
                staff_id,
                open_only,
            } => {
                (!open_only || order.is_open())
                    && order.items.iter().any(|item| {
                        item.assigned_cook_id == Some(*staff_id)
                            || item.assigned_waiter_id == Some(*staff_id)
                    })
            }
        }
    }
}
