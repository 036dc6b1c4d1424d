//! Status enums for line items and orders.
//!
//! The variants are declared in progress order, so the derived `Ord` means "further along".
//! Transition rules live in [`crate::state_machine`].

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Cook-side progress of one line item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CookStatus {
    #[default]
    Pending,
    Preparing,
    #[serde(alias = "complete")]
    Completed,
}

impl CookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookStatus::Pending => "pending",
            CookStatus::Preparing => "preparing",
            CookStatus::Completed => "completed",
        }
    }
}

impl Display for CookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Waiter-side progress of one line item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WaiterStatus {
    #[default]
    Pending,
    Accepted,
    Served,
}

impl WaiterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaiterStatus::Pending => "pending",
            WaiterStatus::Accepted => "accepted",
            WaiterStatus::Served => "served",
        }
    }
}

impl Display for WaiterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order-level status shown to customers and staff.
///
/// `Ready` is the coarse name for what the staff-facing sequence calls `food_prepared`; both
/// spellings deserialize to it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    #[serde(alias = "food_prepared")]
    Ready,
    Serving,
    Served,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Serving => "serving",
            OrderStatus::Served => "served",
            OrderStatus::Completed => "completed",
        }
    }

    /// Completed orders no longer count towards staff workload.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_prepared_is_accepted_as_ready() {
        let status: OrderStatus = serde_json::from_str("\"food_prepared\"").unwrap();
        assert_eq!(status, OrderStatus::Ready);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"ready\"");
    }

    #[test]
    fn statuses_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&WaiterStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        let cook: CookStatus = serde_json::from_str("\"complete\"").unwrap();
        assert_eq!(cook, CookStatus::Completed);
    }

    #[test]
    fn order_status_ordering_follows_progress() {
        assert!(OrderStatus::Pending < OrderStatus::Preparing);
        assert!(OrderStatus::Ready < OrderStatus::Serving);
        assert!(OrderStatus::Served < OrderStatus::Completed);
        assert!(OrderStatus::Completed.is_terminal());
        assert!(!OrderStatus::Served.is_terminal());
    }
}
