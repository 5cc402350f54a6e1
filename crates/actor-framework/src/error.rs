//! # Framework Errors
//!
//! Errors raised by the plumbing itself (closed channels, missing ids) plus a
//! boxed carrier for the entity's own error type.

use std::error::Error;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the entity's typed error from an [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when this is a plumbing error or when the
    /// boxed error is of a different type, so callers can fall through to
    /// their own mapping.
    pub fn downcast_entity<E: Error + 'static>(self) -> Result<E, FrameworkError> {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[test]
    fn downcast_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfStock));
        assert_eq!(err.downcast_entity::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn downcast_passes_through_other_errors() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        let back = err.downcast_entity::<OutOfStock>().unwrap_err();
        assert!(back.to_string().contains("disk"));

        let closed = FrameworkError::ActorClosed.downcast_entity::<OutOfStock>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }
}
