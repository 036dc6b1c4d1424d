//! # Order Actor
//!
//! Owns the orders: the only record in the system that several staff members write to
//! concurrently.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for
//!   [`Order`](crate::model::Order): draft validation, the restaurant check, and the
//!   forward-only guard on revisions
//! - [`error`] - [`OrderError`], the error type of every order-facing operation
//! - [`actions`] - [`OrderAction`], one step on one item's cook or waiter track
//!
//! ## Writes
//!
//! Orders are created from an [`OrderDraft`](crate::model::OrderDraft) whose items are already
//! assigned, so creation is all-or-nothing. Item steps are [`OrderAction`]s, validated and
//! applied against the current record, so staff working on different items never collide.
//! Whole-order writes are an [`OrderRevision`](crate::model::OrderRevision) replacing the
//! item tracks and the status. Writers send it with `update_if` and the version they read; a
//! concurrent writer makes the second write fail with [`OrderError::Conflict`] instead of
//! overwriting the first one.
//!
//! ## Context
//!
//! `Context = RestaurantClient`.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use resource_actor::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
