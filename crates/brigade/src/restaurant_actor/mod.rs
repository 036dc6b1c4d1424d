//! # Restaurant Actor
//!
//! Owns the restaurants. It has no dependencies (`Context = ()`) and no custom actions; the
//! staff and order actors hold a [`RestaurantClient`](crate::clients::RestaurantClient) in
//! their context to check that a restaurant exists before accepting records for it.
//!
//! ## Usage
//!
//! ```rust
//! use brigade::restaurant_actor;
//! use brigade::model::RestaurantCreate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = restaurant_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .open_restaurant(RestaurantCreate { name: "Trattoria".to_string() })
//!         .await?;
//!     client.ensure_exists(id).await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::RestaurantClient;
use crate::model::Restaurant;
use resource_actor::ResourceActor;

/// Creates a new Restaurant actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Restaurant>, RestaurantClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, RestaurantClient::new(generic_client))
}
