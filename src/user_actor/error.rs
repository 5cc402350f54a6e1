//! Error types for the User actor.

use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            other => other
                .downcast_entity::<UserError>()
                .unwrap_or_else(|e| UserError::ActorCommunicationError(e.to_string())),
        }
    }
}
