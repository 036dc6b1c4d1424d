//! [`ActorEntity`] implementation for [`Staff`].

use super::{StaffAction, StaffActionResult, StaffError};
use crate::clients::RestaurantClient;
use crate::model::{Staff, StaffCreate, StaffFilter, StaffId, StaffUpdate};
use async_trait::async_trait;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Staff {
    type Id = StaffId;
    type Create = StaffCreate;
    type Update = StaffUpdate;
    type Action = StaffAction;
    type ActionResult = StaffActionResult;
    type Filter = StaffFilter;
    type Context = RestaurantClient;
    type Error = StaffError;

    fn from_create_params(id: StaffId, params: StaffCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(StaffError::ValidationError(
                "staff name must not be empty".to_string(),
            ));
        }
        Ok(Self::new(id, params.restaurant_id, name, params.role))
    }

    fn matches(&self, filter: &StaffFilter) -> bool {
        filter.accepts(self)
    }

    /// Rejects hires for restaurants that do not exist.
    async fn on_create(&mut self, restaurants: &RestaurantClient) -> Result<(), Self::Error> {
        restaurants.ensure_exists(self.restaurant_id).await?;
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: StaffUpdate,
        _ctx: &RestaurantClient,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(StaffError::ValidationError(
                    "staff name must not be empty".to_string(),
                ));
            }
            self.name = name.to_string();
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: StaffAction,
        _ctx: &RestaurantClient,
    ) -> Result<StaffActionResult, Self::Error> {
        let active = matches!(action, StaffAction::Reactivate);
        let changed = self.active != active;
        self.active = active;
        Ok(changed)
    }
}
