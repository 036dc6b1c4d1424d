//! # Resource Actor
//!
//! An in-process record store built on the **Actor Model**: every record type gets one
//! `ResourceActor` task that owns its records and processes requests one at a time, and any
//! number of cheap, cloneable `ResourceClient`s that talk to it over channels.
//!
//! On top of the plain CRUD + Action surface of a resource-oriented actor, the store adds the
//! three things a shared, concurrently edited record needs:
//!
//! - **Versions** – every record is stored as a [`Versioned`] envelope. Each committed
//!   mutation bumps the version, and [`ResourceClient::update_if`] only commits when the caller
//!   read the current version. This is optimistic concurrency control: a read-modify-write
//!   cycle that raced another writer fails with [`FrameworkError::Conflict`] instead of
//!   silently overwriting it.
//! - **Queries** – [`ResourceClient::list`] returns every record accepted by
//!   [`ActorEntity::matches`] for a filter, in ascending ID order.
//! - **Change feeds** – [`ResourceClient::subscribe`] registers a filtered [`Subscription`] that
//!   receives a [`Change`] after every committed mutation.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) – business rules for one record type.
//! 2. **Runtime Layer** ([`ResourceActor`]) – message processing, versions, change feeds.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) – type-safe communication.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via `run(context)`, not at construction time.
//! An order store that must check a restaurant exists is started with the restaurant client
//! as its context:
//!
//! ```rust,ignore
//! let (restaurant_actor, restaurants) = ResourceActor::<Restaurant>::new(32);
//! let (order_actor, orders) = ResourceActor::<Order>::new(32);
//! tokio::spawn(restaurant_actor.run(()));
//! tokio::spawn(order_actor.run(RestaurantClient::new(restaurants)));
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - Messages are processed **sequentially** within an actor, so each request is atomic.
//! - Multi-step client workflows rely on versions, not locks.
//!
//! ## Testing
//!
//! See the [`mock`] module for `MockClient`, which answers requests from canned expectations
//! so client logic and hooks can be tested without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod subscription;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Change, ChangeKind, ResourceRequest, Response, SubscriptionId, Versioned};
pub use subscription::Subscription;
