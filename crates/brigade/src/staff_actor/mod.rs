//! # Staff Actor
//!
//! Owns cooks and waiters. Staff are hired by a manager, and afterwards only deactivated or
//! reactivated through [`StaffAction`]; nothing is ever deleted, so line items assigned to a
//! former employee keep a valid reference.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for
//!   [`Staff`](crate::model::Staff)
//! - [`error`] - [`StaffError`]
//! - [`actions`] - [`StaffAction`]
//!
//! ## Context
//!
//! `Context = RestaurantClient`. A hire is rejected with `RestaurantNotFound` unless the
//! restaurant exists.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::StaffClient;
use crate::model::Staff;
use resource_actor::ResourceActor;

/// Creates a new Staff actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Staff>, StaffClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, StaffClient::new(generic_client))
}
