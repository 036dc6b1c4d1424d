//! Least-busy staff assignment.
//!
//! - [`workload`] counts the open line items each active cook and waiter already holds.
//! - [`planner`] hands the items of a new order out greedily against those counts.
//! - [`gate`] serializes assignment per restaurant, so two concurrent submissions never plan
//!   against the same snapshot.

pub mod gate;
pub mod planner;
pub mod workload;

pub use gate::AssignmentGates;
pub use planner::assign;
pub use workload::{LoadMap, StaffLoad, WorkloadIndex};
