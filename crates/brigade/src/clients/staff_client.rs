//! # Staff Client
//!
//! Provides a high-level API for interacting with the `Staff` actor.
use crate::model::{RestaurantId, Role, Staff, StaffCreate, StaffFilter, StaffId};
use crate::staff_actor::{StaffAction, StaffError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Staff actor.
#[derive(Clone)]
pub struct StaffClient {
    inner: ResourceClient<Staff>,
}

impl StaffClient {
    pub fn new(inner: ResourceClient<Staff>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Staff> for StaffClient {
    type Error = StaffError;

    fn inner(&self) -> &ResourceClient<Staff> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        StaffError::from(e)
    }
}

impl StaffClient {
    #[instrument(skip(self))]
    pub async fn hire(&self, params: StaffCreate) -> Result<Staff, StaffError> {
        debug!("Sending request");
        let record = self.inner.create(params).await?;
        Ok(record.into_inner())
    }

    /// Takes the staff member out of assignment. Returns `false` if already inactive.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: StaffId) -> Result<bool, StaffError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, StaffAction::Deactivate).await?)
    }

    /// Returns `false` if already active.
    #[instrument(skip(self))]
    pub async fn reactivate(&self, id: StaffId) -> Result<bool, StaffError> {
        debug!("Sending request");
        Ok(self.inner.perform_action(id, StaffAction::Reactivate).await?)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: StaffId) -> Result<Staff, StaffError> {
        self.get(id)
            .await?
            .map(|record| record.into_inner())
            .ok_or_else(|| StaffError::NotFound(id.to_string()))
    }

    /// Active staff of `role` at `restaurant_id`, in ID order.
    #[instrument(skip(self))]
    pub async fn active_staff(
        &self,
        restaurant_id: RestaurantId,
        role: Role,
    ) -> Result<Vec<Staff>, StaffError> {
        let records = self.list(StaffFilter::active(restaurant_id, role)).await?;
        Ok(records.into_iter().map(|record| record.into_inner()).collect())
    }

    /// Everyone ever hired at the restaurant, active or not.
    #[instrument(skip(self))]
    pub async fn roster(&self, restaurant_id: RestaurantId) -> Result<Vec<Staff>, StaffError> {
        let records = self.list(StaffFilter::roster(restaurant_id)).await?;
        Ok(records.into_iter().map(|record| record.into_inner()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_deactivate_sends_action() {
        let (client, mut receiver) = create_mock_client::<Staff>(10);
        let staff = StaffClient::new(client);

        let task = tokio::spawn(async move { staff.deactivate(StaffId(2)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, StaffId(2));
        assert_eq!(action, StaffAction::Deactivate);
        responder.send(Ok(true)).unwrap();

        assert!(task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_active_staff_unwraps_records() {
        let mut mock = MockClient::<Staff>::new();
        mock.expect_list().return_ok(vec![
            Staff::new(StaffId(1), RestaurantId(1), "Remy", Role::Cook),
            Staff::new(StaffId(3), RestaurantId(1), "Colette", Role::Cook),
        ]);
        let staff = StaffClient::new(mock.client());

        let cooks = staff.active_staff(RestaurantId(1), Role::Cook).await.unwrap();
        let ids: Vec<_> = cooks.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![StaffId(1), StaffId(3)]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_missing_staff() {
        let mut mock = MockClient::<Staff>::new();
        mock.expect_get(StaffId(8)).return_ok(None);
        let staff = StaffClient::new(mock.client());

        let err = staff.find(StaffId(8)).await.unwrap_err();
        assert_eq!(err, StaffError::NotFound("staff_8".into()));
        mock.verify();
    }
}
