//! Transition tables for line item and order progress.
//!
//! Items carry two independent tracks (cook and waiter) that only move one step forward at a
//! time. The order status is a monotonic enum: staff may push it forward explicitly, and it is
//! promoted automatically from the item aggregate (see [`order::derive_status`]).

pub mod item;
pub mod order;

use crate::model::{CookStatus, OrderStatus, WaiterStatus};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("invalid cook transition: {from} -> {to}")]
    Cook { from: CookStatus, to: CookStatus },
    #[error("invalid waiter transition: {from} -> {to}")]
    Waiter { from: WaiterStatus, to: WaiterStatus },
    #[error("invalid order transition: {from} -> {to}")]
    Order { from: OrderStatus, to: OrderStatus },
    #[error("order cannot complete: {outstanding} of {total} items not done")]
    ItemsOutstanding { outstanding: usize, total: usize },
}
