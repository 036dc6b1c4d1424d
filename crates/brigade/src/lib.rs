//! # Brigade
//!
//! Order fan-out for a restaurant kitchen. A customer's cart becomes one order whose line items
//! are each handed to the least busy active cook and waiter. Every item then moves through two
//! independent tracks:
//!
//! - cook: `pending -> preparing -> completed`
//! - waiter: `pending -> accepted -> served`
//!
//! The order's coarse status follows its items and only ever moves forward. It reaches
//! `completed` once every item is both cooked and served.
//!
//! ## Module Tour
//!
//! ### Records ([`model`], [`restaurant_actor`], [`staff_actor`], [`order_actor`], [`clients`])
//! Restaurants, staff and orders each live in one
//! [`ResourceActor`](resource_actor::ResourceActor). The entity implementations hold the
//! validation rules, and the clients wrap the generic request surface in domain methods.
//!
//! ### Rules ([`state_machine`], [`assignment`], [`session`])
//! Pure functions for item and order transitions, the least-busy planner with its workload
//! counts, and the caller's identity checks.
//!
//! ### Orchestration ([`service`], [`reconciler`], [`notify`], [`lifecycle`])
//! [`OrderService`](service::OrderService) is the entry point for every operation.
//! [`BrigadeSystem`](lifecycle::BrigadeSystem) starts everything and shuts it down.
//!
//! ### Ambient ([`config`], [`retry`])
//! TOML configuration and the bounded retry used for conditional order writes.

pub mod assignment;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod order_actor;
pub mod reconciler;
pub mod restaurant_actor;
pub mod retry;
pub mod service;
pub mod session;
pub mod staff_actor;
pub mod state_machine;
