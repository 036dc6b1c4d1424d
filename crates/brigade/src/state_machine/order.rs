//! Order-level status transitions.
//!
//! ```text
//! Pending → Preparing → Ready → Serving → Served → Completed
//! ```
//!
//! Any forward move is allowed, nothing moves back. `Completed` is additionally guarded by
//! the item aggregate.

use super::TransitionError;
use crate::model::{CookStatus, Order, OrderStatus};

/// A status change that was applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Check if an explicit status change is valid, ignoring item guards.
pub fn is_transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    match (from, to) {
        // Nothing leaves the terminal state
        (Completed, _) => false,
        // Cooking started
        (Pending, Preparing) => true,
        // Coarse staff signals, skipping is fine
        (Pending | Preparing, Ready) => true,
        (Pending | Preparing | Ready, Serving) => true,
        (Pending | Preparing | Ready | Serving, Served) => true,
        // Guarded by `all_items_done` in `set_status`
        (_, Completed) => true,
        _ => false,
    }
}

/// Applies an explicit status signal to `order`.
///
/// Fails when the move is backward or a repeat, or when `to` is `Completed` while some item is
/// not done. The order is unchanged on failure.
pub fn set_status(order: &mut Order, to: OrderStatus) -> Result<StatusChange, TransitionError> {
    let from = order.status;
    if !is_transition_allowed(from, to) {
        return Err(TransitionError::Order { from, to });
    }
    if to == OrderStatus::Completed && !order.all_items_done() {
        let outstanding = order.items.iter().filter(|item| !item.is_done()).count();
        return Err(TransitionError::ItemsOutstanding {
            outstanding,
            total: order.items.len(),
        });
    }
    order.status = to;
    Ok(StatusChange { from, to })
}

/// The status `order` should have given its items: never lower than the stored one,
/// `Preparing` once any cook started, `Completed` once every item is done.
pub fn derive_status(order: &Order) -> OrderStatus {
    let floor = if !order.items.is_empty() && order.all_items_done() {
        OrderStatus::Completed
    } else if order
        .items
        .iter()
        .any(|item| item.cook_status != CookStatus::Pending)
    {
        OrderStatus::Preparing
    } else {
        OrderStatus::Pending
    };
    order.status.max(floor)
}

/// Promotes `order` to its derived status. Returns the change, if any.
pub fn reconcile(order: &mut Order) -> Option<StatusChange> {
    let from = order.status;
    let to = derive_status(order);
    if to == from {
        return None;
    }
    order.status = to;
    Some(StatusChange { from, to })
}
