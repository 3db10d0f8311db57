//! Test repositories — mock `StoryRepository` implementations for tests.

use async_trait::async_trait;
use storyloom_core::error::DomainError;
use storyloom_core::repository::StoryRepository;
use storyloom_core::story::Story;
use uuid::Uuid;

/// A story repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingStoryRepository;

#[async_trait]
impl StoryRepository for FailingStoryRepository {
    async fn put(&self, _story: Story) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("store unavailable".into()))
    }

    async fn get(&self, _id: Uuid) -> Result<Option<Story>, DomainError> {
        Err(DomainError::Infrastructure("store unavailable".into()))
    }
}
