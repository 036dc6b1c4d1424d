//! # Generic Messages
//!
//! This module defines the message types exchanged between `ResourceClient` and
//! `ResourceActor`, and the envelopes the actor hands back (`Versioned`, `Change`).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::{mpsc, oneshot};

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A stored entity together with its revision.
///
/// The version starts at 1 on creation and increases by one on every committed update or
/// action. Conditional updates compare against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub entity: T,
}

impl<T> Versioned<T> {
    pub fn into_inner(self) -> T {
        self.entity
    }
}

/// What happened to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
}

/// A change pushed to subscribers after a mutation commits.
#[derive(Debug, Clone)]
pub struct Change<T> {
    pub kind: ChangeKind,
    pub record: Versioned<T>,
}

/// Handle identifying one registered subscriber inside an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Every actor manages one record type (the [`ActorEntity`]). Instead of ad-hoc messages per
/// operation, requests are standardized around lifecycle operations that apply to almost any
/// persistent record:
///
/// - **Create**: builds a record from [`ActorEntity::Create`] and stores it at version 1.
/// - **Get**: fetches the current record by ID.
/// - **List**: returns every record accepted by [`ActorEntity::matches`], in ID order.
/// - **Update**: applies [`ActorEntity::Update`], optionally only if the stored version equals
///   `expected_version`.
/// - **Action**: executes a custom [`ActorEntity::Action`].
/// - **Subscribe / Unsubscribe**: registers or removes a change feed for a filter.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<Versioned<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<Versioned<T>>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<Versioned<T>>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        expected_version: Option<u64>,
        respond_to: Response<Versioned<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Subscribe {
        filter: T::Filter,
        feed: mpsc::UnboundedSender<Change<T>>,
        respond_to: Response<SubscriptionId>,
    },
    Unsubscribe {
        subscription: SubscriptionId,
        respond_to: Response<bool>,
    },
}
