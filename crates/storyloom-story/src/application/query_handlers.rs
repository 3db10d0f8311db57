//! Query handlers for the story context.
//!
//! This module contains query handlers that load stories and return
//! read-only view DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storyloom_core::error::DomainError;
use storyloom_core::repository::StoryRepository;
use storyloom_core::story::{Character, GenerationPhase, Story, WorldBuilderEntry};
use uuid::Uuid;

/// Read-only view of a story.
#[derive(Debug, Clone, Serialize)]
pub struct StoryView {
    /// The story identifier.
    pub story_id: Uuid,
    /// Free-text story prompt.
    pub prompt: String,
    /// Description of the main character.
    pub main_character_desc: String,
    /// Target length in words.
    pub target_length: u32,
    /// World guide text.
    pub world_guide: String,
    /// Genre.
    pub genre: String,
    /// Tone.
    pub tone: String,
    /// Prose style.
    pub style: String,
    /// World-building entries in generation order.
    pub world_builder: Vec<WorldBuilderEntry>,
    /// Generated outline.
    pub story_outline: String,
    /// Generated characters.
    pub characters: Vec<Character>,
    /// Generation progress.
    pub phase: GenerationPhase,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl From<Story> for StoryView {
    fn from(story: Story) -> Self {
        Self {
            story_id: story.id,
            prompt: story.prompt,
            main_character_desc: story.main_character_desc,
            target_length: story.target_length,
            world_guide: story.world_guide,
            genre: story.genre,
            tone: story.tone,
            style: story.style,
            world_builder: story.world_builder,
            story_outline: story.story_outline,
            characters: story.characters,
            phase: story.phase,
            created_at: story.created_at,
        }
    }
}

/// Retrieves a story by its ID without triggering generation.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if no story exists for the ID.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_story_by_id(
    story_id: Uuid,
    repo: &dyn StoryRepository,
) -> Result<StoryView, DomainError> {
    repo.get(story_id)
        .await?
        .map(StoryView::from)
        .ok_or(DomainError::StoryNotFound(story_id))
}
