//! # ActorClient Trait
//!
//! Common interface for record-specific clients, adding default `get`, `list`, and
//! `subscribe` methods on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient, Subscription, Versioned};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Dish { id: u32 }
/// #[derive(Debug)] struct DishCreate;
/// #[derive(Debug)] struct DishUpdate;
/// #[derive(Debug)] enum DishAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct DishError(String);
///
/// #[async_trait]
/// impl ActorEntity for Dish {
///     type Id = u32;
///     type Create = DishCreate;
///     type Update = DishUpdate;
///     type Action = DishAction;
///     type ActionResult = ();
///     type Filter = ();
///     type Context = ();
///     type Error = DishError;
///
///     fn from_create_params(id: u32, _: DishCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, a: DishAction, _: &()) -> Result<(), Self::Error> { match a {} }
/// }
///
/// struct DishClient {
///     inner: ResourceClient<Dish>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Dish> for DishClient {
///     type Error = DishError;
///
///     fn inner(&self) -> &ResourceClient<Dish> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         DishError(e.to_string())
///     }
/// }
///
/// async fn usage(client: DishClient) {
///     // get(), list() and subscribe() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list(()).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific record error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<Versioned<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record accepted by `filter`, in ID order.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<Versioned<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Open a change feed for records accepted by `filter`.
    #[tracing::instrument(skip(self))]
    async fn subscribe(&self, filter: T::Filter) -> Result<Subscription<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().subscribe(filter).await.map_err(Self::map_error)
    }
}
