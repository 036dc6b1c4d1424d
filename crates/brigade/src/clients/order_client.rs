//! # Order Client
//!
//! Provides a high-level API for interacting with the `Order` actor.
//!
//! Item steps go through [`OrderClient::advance`], applied atomically by the actor. Whole-order
//! writes go through [`OrderClient::revise`], which is always conditional on the version the
//! caller read. Read-modify-write loops live in [`OrderService`](crate::service::OrderService).
use crate::model::{Order, OrderDraft, OrderFilter, OrderId, OrderRevision, RestaurantId, StaffId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient, Subscription, Versioned};
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}

impl OrderClient {
    /// Stores a fully assigned draft. Nothing is stored if validation fails.
    #[instrument(skip(self, draft), fields(restaurant_id = %draft.restaurant_id, items = draft.items.len()))]
    pub async fn place(&self, draft: OrderDraft) -> Result<Versioned<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.create(draft).await?)
    }

    /// Fetches the order, failing with `NotFound` if it does not exist.
    #[instrument(skip(self))]
    pub async fn fetch(&self, id: OrderId) -> Result<Versioned<Order>, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Writes `revision` only if the order is still at `expected_version`.
    #[instrument(skip(self))]
    pub async fn revise(
        &self,
        id: OrderId,
        expected_version: u64,
        revision: OrderRevision,
    ) -> Result<Versioned<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.update_if(id, expected_version, revision).await?)
    }

    /// Applies one item step against the current record.
    #[instrument(skip(self))]
    pub async fn advance(
        &self,
        id: OrderId,
        action: OrderAction,
    ) -> Result<OrderActionResult, OrderError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, action).await?)
    }

    /// Orders of the restaurant that are not completed, in ID order.
    #[instrument(skip(self))]
    pub async fn open_orders(&self, restaurant_id: RestaurantId) -> Result<Vec<Order>, OrderError> {
        let records = self.list(OrderFilter::open_at(restaurant_id)).await?;
        Ok(records.into_iter().map(|record| record.into_inner()).collect())
    }

    /// Open orders with at least one item assigned to `staff_id`.
    #[instrument(skip(self))]
    pub async fn assigned_to(&self, staff_id: StaffId) -> Result<Vec<Order>, OrderError> {
        let records = self
            .list(OrderFilter::AssignedTo {
                staff_id,
                open_only: true,
            })
            .await?;
        Ok(records.into_iter().map(|record| record.into_inner()).collect())
    }

    /// Change feed for one order.
    #[instrument(skip(self))]
    pub async fn watch_order(&self, id: OrderId) -> Result<Subscription<Order>, OrderError> {
        self.subscribe(OrderFilter::Order(id)).await
    }

    /// Change feed for every order of a restaurant, completed ones included.
    #[instrument(skip(self))]
    pub async fn watch_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Subscription<Order>, OrderError> {
        self.subscribe(OrderFilter::Restaurant {
            restaurant_id,
            open_only: false,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CookStatus, ItemProgress, OrderStatus, WaiterStatus};
    use resource_actor::mock::{create_mock_client, expect_action, expect_update, MockClient};

    #[tokio::test]
    async fn test_revise_is_conditional_on_version() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let revision = OrderRevision {
            items: vec![ItemProgress {
                cook: CookStatus::Preparing,
                waiter: WaiterStatus::Pending,
            }],
            status: OrderStatus::Preparing,
        };
        let task = tokio::spawn(async move { orders.revise(OrderId(5), 3, revision).await });

        let (id, update, expected_version, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, OrderId(5));
        assert_eq!(expected_version, Some(3));
        assert_eq!(update.status, OrderStatus::Preparing);

        responder
            .send(Err(FrameworkError::Conflict {
                id: "order_5".into(),
                expected: 3,
                actual: 4,
            }))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, OrderError::Conflict { actual: 4, .. }));
    }

    #[tokio::test]
    async fn test_advance_sends_action() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);
        let session = crate::session::Session::manager(RestaurantId(1));

        let task = tokio::spawn(async move {
            orders
                .advance(
                    OrderId(4),
                    OrderAction::AdvanceCook {
                        session,
                        key: crate::model::LineItemKey(1),
                        next: CookStatus::Preparing,
                    },
                )
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, OrderId(4));
        assert!(matches!(
            action,
            OrderAction::AdvanceCook {
                next: CookStatus::Preparing,
                ..
            }
        ));
        responder
            .send(Err(FrameworkError::NotFound("order_4".into())))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err, OrderError::NotFound("order_4".into()));
    }

    #[tokio::test]
    async fn test_fetch_missing_order() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_get(OrderId(2)).return_ok(None);
        let orders = OrderClient::new(mock.client());

        let err = orders.fetch(OrderId(2)).await.unwrap_err();
        assert_eq!(err, OrderError::NotFound("order_2".into()));
        mock.verify();
    }

    #[tokio::test]
    async fn test_typed_entity_error_survives_the_channel() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                OrderError::ValidationError("cart is empty".into()),
            )));
        let orders = OrderClient::new(mock.client());

        let draft = OrderDraft {
            restaurant_id: RestaurantId(1),
            customer: crate::model::CustomerInfo::named("Lin"),
            table_number: 1,
            ordered_at: chrono::Utc::now(),
            items: vec![],
            notes: None,
        };
        let err = orders.place(draft).await.unwrap_err();
        assert_eq!(err, OrderError::ValidationError("cart is empty".into()));
        mock.verify();
    }
}
