//! Per-item cook and waiter tracks.
//!
//! ```text
//! cook:   Pending → Preparing → Completed
//! waiter: Pending → Accepted  → Served
//! ```
//!
//! The tracks are independent. A waiter may mark an item served before the cook completes it.

use super::TransitionError;
use crate::model::{CookStatus, LineItem, WaiterStatus};
use serde::{Deserialize, Serialize};

/// Combined display status of a line item. Not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Waiting,
    InProgress,
    Done,
}

pub fn is_cook_transition_allowed(from: CookStatus, to: CookStatus) -> bool {
    use CookStatus::*;

    matches!((from, to), (Pending, Preparing) | (Preparing, Completed))
}

pub fn is_waiter_transition_allowed(from: WaiterStatus, to: WaiterStatus) -> bool {
    use WaiterStatus::*;

    matches!((from, to), (Pending, Accepted) | (Accepted, Served))
}

/// Moves the cook track of `item` to `to`, returning the previous status.
pub fn advance_cook(item: &mut LineItem, to: CookStatus) -> Result<CookStatus, TransitionError> {
    let from = item.cook_status;
    if !is_cook_transition_allowed(from, to) {
        return Err(TransitionError::Cook { from, to });
    }
    item.cook_status = to;
    Ok(from)
}

/// Moves the waiter track of `item` to `to`, returning the previous status.
pub fn advance_waiter(
    item: &mut LineItem,
    to: WaiterStatus,
) -> Result<WaiterStatus, TransitionError> {
    let from = item.waiter_status;
    if !is_waiter_transition_allowed(from, to) {
        return Err(TransitionError::Waiter { from, to });
    }
    item.waiter_status = to;
    Ok(from)
}

pub fn is_done(cook: CookStatus, waiter: WaiterStatus) -> bool {
    cook == CookStatus::Completed && waiter == WaiterStatus::Served
}

pub fn item_status(cook: CookStatus, waiter: WaiterStatus) -> ItemStatus {
    if is_done(cook, waiter) {
        ItemStatus::Done
    } else if cook == CookStatus::Pending && waiter == WaiterStatus::Pending {
        ItemStatus::Waiting
    } else {
        ItemStatus::InProgress
    }
}
