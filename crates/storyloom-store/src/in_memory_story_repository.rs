//! In-memory implementation of the `StoryRepository` trait.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use storyloom_core::error::DomainError;
use storyloom_core::repository::StoryRepository;
use storyloom_core::story::Story;
use tracing::{debug, instrument};
use uuid::Uuid;

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Infrastructure("story store lock poisoned".into())
}

/// Unbounded story store keyed by story id.
#[derive(Debug, Default)]
pub struct InMemoryStoryRepository {
    stories: RwLock<HashMap<Uuid, Story>>,
}

impl InMemoryStoryRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stories held.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.stories.read().map_err(poisoned)?.len())
    }

    /// Whether the store holds no stories.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    #[instrument(skip(self, story), fields(story_id = %story.id))]
    async fn put(&self, story: Story) -> Result<(), DomainError> {
        let mut stories = self.stories.write().map_err(poisoned)?;
        let replaced = stories.insert(story.id, story).is_some();
        debug!(replaced, "stored story");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<Option<Story>, DomainError> {
        let stories = self.stories.read().map_err(poisoned)?;
        Ok(stories.get(&id).cloned())
    }
}
