//! # Framework Errors
//!
//! Errors raised by the actor plumbing and by the query executor. Entity
//! hooks report their own error types, boxed into [`FrameworkError::EntityError`].

/// Errors that can occur within the framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Another stored entity already holds this value of a unique field.
    #[error("Duplicate value for unique field {field}: {value}")]
    UniqueViolation { field: String, value: String },
    /// A predicate or sort order named an attribute or relation the record does not have.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}
