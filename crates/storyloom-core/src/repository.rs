//! Story repository abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::story::Story;

/// Repository trait for storing and loading story records.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Insert `story`, replacing any record with the same id.
    async fn put(&self, story: Story) -> Result<(), DomainError>;

    /// Load the story stored under `id`, or `None` if there is none.
    async fn get(&self, id: Uuid) -> Result<Option<Story>, DomainError>;
}
