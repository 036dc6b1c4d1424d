//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a collection of records
//! and processes requests against it sequentially. It implements the "Server" side of the
//! Actor Model.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Change, ChangeKind, ResourceRequest, Versioned};
use crate::subscription::SubscriberSet;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of versioned records.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`), the receiver
/// end of the channel, and the registered change feeds.
///
/// **Concurrency Model**:
/// Each actor processes its messages *sequentially*, so the `store` needs no `Mutex`. That
/// makes every single request atomic, but a client that reads a record, computes something,
/// and writes it back can still race another client doing the same. Such clients use
/// [`ResourceClient::update_if`], which only commits when the stored version is the one they
/// read.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client`.
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use resource_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Table { id: u32, seats: u32 }
/// #[derive(Debug)] struct TableCreate { seats: u32 }
/// #[derive(Debug)] struct TableUpdate { seats: u32 }
/// #[derive(Debug)] enum TableAction {}
/// #[derive(Debug, thiserror::Error)] #[error("table error")] struct TableError;
///
/// #[async_trait]
/// impl ActorEntity for Table {
///     type Id = u32;
///     type Create = TableCreate;
///     type Update = TableUpdate;
///     type Action = TableAction;
///     type ActionResult = ();
///     type Filter = ();
///     type Context = ();
///     type Error = TableError;
///
///     fn from_create_params(id: u32, p: TableCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, seats: p.seats })
///     }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, u: TableUpdate, _: &()) -> Result<(), Self::Error> {
///         self.seats = u.seats;
///         Ok(())
///     }
///     async fn handle_action(&mut self, a: TableAction, _: &()) -> Result<(), Self::Error> {
///         match a {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Table>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let created = client.create(TableCreate { seats: 4 }).await.unwrap();
///     assert_eq!(created.version, 1);
///     let updated = client.update_if(created.entity.id, 1, TableUpdate { seats: 6 }).await.unwrap();
///     assert_eq!(updated.version, 2);
///     assert!(client.update_if(created.entity.id, 1, TableUpdate { seats: 2 }).await.is_err());
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: next `u32` ID → `from_create_params` → `on_create` → store at version 1 →
///   publish `Created`.
/// * **Get**: clone of the stored record, or `None`.
/// * **List**: every record accepted by `matches`, in ascending ID order.
/// * **Update**: version check (if requested) → `on_update` on a scratch copy → commit with
///   version + 1 → publish `Updated`.
/// * **Action**: `handle_action` on a scratch copy → commit with version + 1 → publish.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, Versioned<T>>,
    subscribers: SubscriberSet<T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            subscribers: SubscriberSet::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook, so entities can reach dependencies (other
    /// clients) created *after* this actor but *before* its loop started.
    pub async fn run(mut self, context: T::Context) {
        // "Order" instead of "brigade::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.next_id += 1;
                            let record = Versioned {
                                version: 1,
                                entity: item,
                            };
                            self.store.insert(id.clone(), record.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            self.publish(ChangeKind::Created, &record);
                            let _ = respond_to.send(Ok(record));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<_> = self
                        .store
                        .values()
                        .filter(|record| record.entity.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    expected_version,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, ?expected_version, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Some(expected) = expected_version {
                        if expected != current.version {
                            warn!(entity_type, %id, expected, actual = current.version, "Conflict");
                            let _ = respond_to.send(Err(FrameworkError::Conflict {
                                id: id.to_string(),
                                expected,
                                actual: current.version,
                            }));
                            continue;
                        }
                    }
                    let mut scratch = current.entity.clone();
                    if let Err(e) = scratch.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let record = self.commit(id.clone(), scratch);
                    info!(entity_type, %id, version = record.version, "Updated");
                    self.publish(ChangeKind::Updated, &record);
                    let _ = respond_to.send(Ok(record));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut scratch = current.entity.clone();
                    match scratch.handle_action(action, &context).await {
                        Ok(result) => {
                            let record = self.commit(id.clone(), scratch);
                            info!(entity_type, %id, version = record.version, "Action ok");
                            self.publish(ChangeKind::Updated, &record);
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Subscribe {
                    filter,
                    feed,
                    respond_to,
                } => {
                    debug!(entity_type, ?filter, "Subscribe");
                    let id = self.subscribers.add(filter, feed);
                    info!(entity_type, subscription = id.0, subscribers = self.subscribers.len(), "Subscribed");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Unsubscribe {
                    subscription,
                    respond_to,
                } => {
                    let removed = self.subscribers.remove(subscription);
                    info!(entity_type, subscription = subscription.0, removed, "Unsubscribed");
                    let _ = respond_to.send(Ok(removed));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Stores `entity` under `id` with the next version and returns the new record.
    fn commit(&mut self, id: T::Id, entity: T) -> Versioned<T> {
        let version = self.store.get(&id).map_or(1, |r| r.version + 1);
        let record = Versioned { version, entity };
        self.store.insert(id, record.clone());
        record
    }

    fn publish(&mut self, kind: ChangeKind, record: &Versioned<T>) {
        self.subscribers.publish(&Change {
            kind,
            record: record.clone(),
        });
    }
}
