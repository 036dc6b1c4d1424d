//! # Change Subscriptions
//!
//! A [`Subscription`] is the receiving half of a filtered change feed registered with a
//! `ResourceActor`. The actor pushes a [`Change`] for every committed create, update, or action
//! whose resulting record matches the subscriber's filter.
//!
//! Feeds are unbounded so a slow subscriber never stalls the actor loop. Call
//! [`Subscription::unsubscribe`] on teardown; a subscription that is simply dropped is pruned
//! the next time the actor publishes, because its feed is closed.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Change, ResourceRequest, SubscriptionId};
use tokio::sync::{mpsc, oneshot};

/// Receiving end of a change feed.
#[derive(Debug)]
pub struct Subscription<T: ActorEntity> {
    id: SubscriptionId,
    feed: mpsc::UnboundedReceiver<Change<T>>,
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Subscription<T> {
    pub(crate) fn new(
        id: SubscriptionId,
        feed: mpsc::UnboundedReceiver<Change<T>>,
        sender: mpsc::Sender<ResourceRequest<T>>,
    ) -> Self {
        Self { id, feed, sender }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next change. Returns `None` once the actor has shut down or the
    /// subscription was removed.
    pub async fn recv(&mut self) -> Option<Change<T>> {
        self.feed.recv().await
    }

    /// Returns a pending change without waiting.
    pub fn try_recv(&mut self) -> Option<Change<T>> {
        self.feed.try_recv().ok()
    }

    /// Removes this subscriber from the actor.
    ///
    /// Returns `Ok(false)` if the actor had already pruned it.
    pub async fn unsubscribe(self) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Unsubscribe {
                subscription: self.id,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

/// Actor-side registration of one subscriber.
pub(crate) struct Subscriber<T: ActorEntity> {
    pub(crate) id: SubscriptionId,
    pub(crate) filter: T::Filter,
    pub(crate) feed: mpsc::UnboundedSender<Change<T>>,
}

/// The actor's set of live subscribers.
pub(crate) struct SubscriberSet<T: ActorEntity> {
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
}

impl<T: ActorEntity> SubscriberSet<T> {
    pub(crate) fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn add(
        &mut self,
        filter: T::Filter,
        feed: mpsc::UnboundedSender<Change<T>>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, filter, feed });
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        before != self.subscribers.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Sends `change` to every matching subscriber and drops the ones whose receiver is gone.
    pub(crate) fn publish(&mut self, change: &Change<T>) {
        self.subscribers.retain(|subscriber| {
            if subscriber.feed.is_closed() {
                return false;
            }
            if !change.record.entity.matches(&subscriber.filter) {
                return true;
            }
            subscriber.feed.send(change.clone()).is_ok()
        });
    }
}
