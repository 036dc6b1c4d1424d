//! # Restaurant Client
//!
//! Provides a high-level API for interacting with the `Restaurant` actor.
use crate::model::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
use crate::restaurant_actor::RestaurantError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Restaurant actor.
#[derive(Clone)]
pub struct RestaurantClient {
    inner: ResourceClient<Restaurant>,
}

impl RestaurantClient {
    pub fn new(inner: ResourceClient<Restaurant>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Restaurant> for RestaurantClient {
    type Error = RestaurantError;

    fn inner(&self) -> &ResourceClient<Restaurant> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        RestaurantError::from(e)
    }
}

impl RestaurantClient {
    #[instrument(skip(self))]
    pub async fn open_restaurant(
        &self,
        params: RestaurantCreate,
    ) -> Result<RestaurantId, RestaurantError> {
        debug!("Sending request");
        let record = self.inner.create(params).await?;
        Ok(record.entity.id)
    }

    #[instrument(skip(self))]
    pub async fn rename(
        &self,
        id: RestaurantId,
        name: String,
    ) -> Result<Restaurant, RestaurantError> {
        debug!("Sending request");
        let record = self
            .inner
            .update(id, RestaurantUpdate { name: Some(name) })
            .await?;
        Ok(record.into_inner())
    }

    /// Fetches the restaurant, failing with `NotFound` if it does not exist.
    #[instrument(skip(self))]
    pub async fn ensure_exists(&self, id: RestaurantId) -> Result<Restaurant, RestaurantError> {
        self.get(id)
            .await?
            .map(|record| record.into_inner())
            .ok_or_else(|| RestaurantError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::{create_mock_client, expect_get};
    use resource_actor::Versioned;

    #[tokio::test]
    async fn test_ensure_exists_returns_restaurant() {
        let (client, mut receiver) = create_mock_client::<Restaurant>(10);
        let restaurants = RestaurantClient::new(client);

        let task = tokio::spawn(async move { restaurants.ensure_exists(RestaurantId(4)).await });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, RestaurantId(4));
        responder
            .send(Ok(Some(Versioned {
                version: 1,
                entity: Restaurant::new(RestaurantId(4), "Noodle Bar"),
            })))
            .unwrap();

        let restaurant = task.await.unwrap().unwrap();
        assert_eq!(restaurant.name, "Noodle Bar");
    }

    #[tokio::test]
    async fn test_ensure_exists_missing_is_not_found() {
        let (client, mut receiver) = create_mock_client::<Restaurant>(10);
        let restaurants = RestaurantClient::new(client);

        let task = tokio::spawn(async move { restaurants.ensure_exists(RestaurantId(9)).await });

        let (_, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        responder.send(Ok(None)).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err, RestaurantError::NotFound("restaurant_9".into()));
    }

    #[tokio::test]
    async fn test_closed_actor_is_communication_error() {
        let (client, receiver) = create_mock_client::<Restaurant>(10);
        drop(receiver);
        let restaurants = RestaurantClient::new(client);

        let err = restaurants
            .ensure_exists(RestaurantId(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RestaurantError::ActorCommunicationError(_)));
    }

    #[tokio::test]
    async fn test_rename_trims_and_rejects_blank_names() {
        let (actor, restaurants) = crate::restaurant_actor::new(10);
        let handle = tokio::spawn(actor.run(()));

        let id = restaurants
            .open_restaurant(RestaurantCreate {
                name: "Trattoria".to_string(),
            })
            .await
            .unwrap();
        let renamed = restaurants.rename(id, " Osteria ".to_string()).await.unwrap();
        assert_eq!(renamed.name, "Osteria");

        let err = restaurants.rename(id, "   ".to_string()).await.unwrap_err();
        assert!(matches!(err, RestaurantError::ValidationError(_)));
        assert_eq!(restaurants.ensure_exists(id).await.unwrap().name, "Osteria");

        drop(restaurants);
        handle.await.unwrap();
    }
}
