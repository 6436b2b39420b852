//! Error types for the Author actor.

use spec_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during author operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthorError {
    /// The requested author was not found.
    #[error("Author not found: {0}")]
    NotFound(String),

    /// A caller passed an argument the operation cannot work with.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The author data provided is invalid.
    #[error("Author validation error: {0}")]
    ValidationError(String),

    /// Another author already holds a value that must be unique.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AuthorError {
    fn from(msg: String) -> Self {
        AuthorError::ActorCommunicationError(msg)
    }
}

impl From<FrameworkError> for AuthorError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => AuthorError::NotFound(id),
            FrameworkError::InvalidArgument(msg) => AuthorError::InvalidArgument(msg),
            FrameworkError::UnknownField(field) => {
                AuthorError::InvalidArgument(format!("unknown field: {field}"))
            }
            FrameworkError::UniqueViolation { field, value } => {
                AuthorError::Conflict(format!("{field} {value} is already taken"))
            }
            FrameworkError::EntityError(inner) => match inner.downcast::<AuthorError>() {
                Ok(author_error) => *author_error,
                Err(other) => AuthorError::ActorCommunicationError(other.to_string()),
            },
            other => AuthorError::ActorCommunicationError(other.to_string()),
        }
    }
}
