//! # Framework Errors
//!
//! Common error types used throughout the store. Domain crates map these into their own
//! error enums (see `ActorClient::map_error`).

/// Errors that can occur within the actor store itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Version conflict on {id}: expected {expected}, found {actual}")]
    Conflict {
        id: String,
        expected: u64,
        actual: u64,
    },
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True when the actor behind the client is gone (closed channel or dropped reply).
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ActorClosed | Self::ActorDropped)
    }

    /// Recovers the entity's own error type from an `EntityError`.
    ///
    /// Returns the original error unchanged when it is not an `EntityError` or wraps a
    /// different type.
    pub fn downcast_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(Self::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("bad draft: {0}")]
    struct DraftError(String);

    #[test]
    fn downcast_recovers_typed_entity_error() {
        let err = FrameworkError::EntityError(Box::new(DraftError("empty".into())));
        let typed = err.downcast_entity::<DraftError>().unwrap();
        assert_eq!(typed, DraftError("empty".into()));
    }

    #[test]
    fn downcast_leaves_other_errors_alone() {
        let err = FrameworkError::Conflict {
            id: "order_1".into(),
            expected: 1,
            actual: 2,
        };
        let back = err.downcast_entity::<DraftError>().unwrap_err();
        assert!(matches!(back, FrameworkError::Conflict { expected: 1, actual: 2, .. }));
        assert_eq!(
            back.to_string(),
            "Version conflict on order_1: expected 1, found 2"
        );
    }

    #[test]
    fn closed_and_dropped_are_unavailable() {
        assert!(FrameworkError::ActorClosed.is_unavailable());
        assert!(FrameworkError::ActorDropped.is_unavailable());
        assert!(!FrameworkError::NotFound("x".into()).is_unavailable());
    }
}
