//! Error types for the Order actor and the order service.

use crate::restaurant_actor::RestaurantError;
use crate::staff_actor::StaffError;
use crate::state_machine::TransitionError;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Unknown order, line item, staff member, or restaurant.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A backward, repeated, or skipped status change.
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),

    /// The order changed between read and conditional write.
    #[error("Version conflict on {id}: expected {expected}, found {actual}")]
    Conflict {
        id: String,
        expected: u64,
        actual: u64,
    },

    /// Malformed draft or a request outside the caller's session.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The store behind a client is gone.
    #[error("Persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl OrderError {
    /// Conflicts and outages are transient; everything else is final.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrderError::Conflict { .. } | OrderError::PersistenceUnavailable(_)
        )
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.downcast_entity::<OrderError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Conflict {
                id,
                expected,
                actual,
            }) => OrderError::Conflict {
                id,
                expected,
                actual,
            },
            Err(other) => OrderError::PersistenceUnavailable(other.to_string()),
        }
    }
}

impl From<RestaurantError> for OrderError {
    fn from(e: RestaurantError) -> Self {
        match e {
            RestaurantError::NotFound(id) => OrderError::NotFound(id),
            RestaurantError::ValidationError(msg) => OrderError::ValidationError(msg),
            RestaurantError::ActorCommunicationError(msg) => OrderError::PersistenceUnavailable(msg),
        }
    }
}

impl From<StaffError> for OrderError {
    fn from(e: StaffError) -> Self {
        match e {
            StaffError::NotFound(id) | StaffError::RestaurantNotFound(id) => {
                OrderError::NotFound(id)
            }
            StaffError::ValidationError(msg) => OrderError::ValidationError(msg),
            StaffError::ActorCommunicationError(msg) => OrderError::PersistenceUnavailable(msg),
        }
    }
}
