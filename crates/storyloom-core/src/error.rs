//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No story is stored under the given identifier.
    #[error("story not found: {0}")]
    StoryNotFound(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/storage error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
