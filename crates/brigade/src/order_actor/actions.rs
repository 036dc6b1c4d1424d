//! Custom actions for the Order actor.

use crate::model::{CookStatus, LineItemKey, Order, WaiterStatus};
use crate::session::Session;
use crate::state_machine::order::StatusChange;

/// One step on one item's track, applied and promoted inside the actor.
///
/// Two staff members moving different items of the same order never conflict: each action
/// sees the record as the previous one left it.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    AdvanceCook {
        session: Session,
        key: LineItemKey,
        next: CookStatus,
    },
    AdvanceWaiter {
        session: Session,
        key: LineItemKey,
        next: WaiterStatus,
    },
}

/// The order as committed, and the status change the step caused, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderActionResult {
    pub order: Order,
    pub change: Option<StatusChange>,
}
