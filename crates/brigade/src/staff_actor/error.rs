//! Error types for the Staff actor.

use crate::restaurant_actor::RestaurantError;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during staff operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StaffError {
    /// The requested staff member was not found.
    #[error("Staff not found: {0}")]
    NotFound(String),

    /// The restaurant the staff member belongs to does not exist.
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    /// The staff data provided is invalid.
    #[error("Staff validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for StaffError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<StaffError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => StaffError::NotFound(id),
            Err(other) => StaffError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl From<RestaurantError> for StaffError {
    fn from(e: RestaurantError) -> Self {
        match e {
            RestaurantError::NotFound(id) => StaffError::RestaurantNotFound(id),
            RestaurantError::ValidationError(msg) => StaffError::ValidationError(msg),
            RestaurantError::ActorCommunicationError(msg) => {
                StaffError::ActorCommunicationError(msg)
            }
        }
    }
}
