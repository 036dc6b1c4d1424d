//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract every record type (Restaurant, Staff, Order, …)
//! implements to be managed by the generic `ResourceActor`. It specifies associated types for
//! IDs, DTOs, actions, filters, context, and errors, and provides lifecycle hooks
//! (`on_create`, `on_update`, `handle_action`) plus the `matches` predicate used by list
//! queries and change subscriptions.
//!
//! # Architecture Note
//! By defining one contract that every record type satisfies, the `ResourceActor` logic is
//! written *once*. Associated types keep payloads apart: an `Order` requires an `OrderDraft`,
//! and the compiler refuses a `StaffCreate` sent to the order store.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] defaults to `Ok(())`.
//!
//! Versions are *not* part of the entity. The actor wraps every stored value in a
//! [`Versioned`](crate::Versioned) envelope and bumps it on each committed mutation.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks can await other actors. The `Context` type is
/// injected into every hook, which allows "late binding" of dependencies (clients are passed
/// to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation. `Ord` gives list queries a
    /// canonical order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing record-specific operations (e.g. `Deactivate`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Predicate payload for `list` and `subscribe` requests.
    type Filter: Send + Sync + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per actor rather than one per message. `OrderError` is the union of
    /// everything the order store can report, which keeps client code to a single match.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity is selected by `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    /// Use this hook for validation that needs other actors.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    ///
    /// The actor applies the hook to a scratch copy and only commits it when the hook returns
    /// `Ok`, so an error leaves the stored record untouched.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    // --- Action Handler (Async) ---

    /// Handle a custom record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
