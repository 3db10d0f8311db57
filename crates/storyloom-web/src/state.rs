//! Shared application state.

use std::sync::Arc;

use storyloom_core::clock::Clock;
use storyloom_core::generation::TextGenerator;
use storyloom_core::repository::StoryRepository;
use storyloom_llm::Backend;
use storyloom_story::application::locks::GenerationLocks;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: Arc<dyn Clock>,
    /// Which backend `generator` talks to.
    pub backend: Backend,
    /// The configured text generation backend.
    pub generator: Arc<dyn TextGenerator>,
    /// Story record store.
    pub story_repository: Arc<dyn StoryRepository>,
    /// Per-story generation locks.
    pub generation_locks: Arc<GenerationLocks>,
}

impl AppState {
    /// Create new application state with an empty lock table.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        backend: Backend,
        generator: Arc<dyn TextGenerator>,
        story_repository: Arc<dyn StoryRepository>,
    ) -> Self {
        Self {
            clock,
            backend,
            generator,
            story_repository,
            generation_locks: Arc::new(GenerationLocks::new()),
        }
    }
}
