//! [`ActorEntity`] implementation for [`Restaurant`].

use super::RestaurantError;
use crate::model::{Restaurant, RestaurantCreate, RestaurantId, RestaurantUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Restaurant {
    type Id = RestaurantId;
    type Create = RestaurantCreate;
    type Update = RestaurantUpdate;
    type Action = std::convert::Infallible;
    type ActionResult = ();
    type Filter = ();
    type Context = ();
    type Error = RestaurantError;

    fn from_create_params(id: RestaurantId, params: RestaurantCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(RestaurantError::ValidationError(
                "restaurant name must not be empty".to_string(),
            ));
        }
        Ok(Self::new(id, name))
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    async fn on_update(&mut self, update: RestaurantUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(RestaurantError::ValidationError(
                    "restaurant name must not be empty".to_string(),
                ));
            }
            self.name = name.to_string();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: std::convert::Infallible,
        _ctx: &(),
    ) -> Result<(), Self::Error> {
        match action {}
    }
}
