//! The story record and its generated components.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// How far world-building generation has progressed for a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    /// Nothing has been generated yet.
    #[default]
    NotStarted,
    /// Topics exist but have not been elaborated.
    TopicsGenerated,
    /// Every topic has been elaborated.
    Elaborated,
}

/// A single entry in the world builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldBuilderEntry {
    /// Topic category, e.g. "Magic System".
    pub category: String,
    /// Topic description; the one-line idea until elaborated.
    pub description: String,
    /// Keywords attached during elaboration.
    pub keywords: Vec<String>,
}

impl WorldBuilderEntry {
    /// Creates an entry with no keywords.
    pub fn new(category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            keywords: Vec::new(),
        }
    }

    /// Replaces the description and keywords with elaborated content.
    pub fn elaborate(&mut self, description: String, keywords: Vec<String>) {
        self.description = description;
        self.keywords = keywords;
    }
}

/// A character in the story. Not yet produced by generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    /// Character name.
    pub name: String,
    /// Character description.
    pub description: String,
    /// Narrative role, e.g. "protagonist".
    pub role: String,
}

/// User-supplied premise a story is created from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryDetails {
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
}

/// A story project and everything generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    /// Unique story identifier.
    pub id: Uuid,
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
    /// Generated world-building entries, in generation order.
    pub world_builder: Vec<WorldBuilderEntry>,
    /// Generated outline.
    pub story_outline: String,
    /// Generated characters.
    pub characters: Vec<Character>,
    /// Generation progress.
    pub phase: GenerationPhase,
    /// When the story was submitted.
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Creates an empty story from the submitted details.
    #[must_use]
    pub fn new(id: Uuid, details: StoryDetails, created_at: DateTime<Utc>) -> Self {
        let StoryDetails {
            prompt,
            main_character_desc,
            target_length,
            world_guide,
            genre,
            tone,
            style,
        } = details;

        Self {
            id,
            prompt,
            main_character_desc,
            target_length,
            world_guide,
            genre,
            tone,
            style,
            world_builder: Vec::new(),
            story_outline: String::new(),
            characters: Vec::new(),
            phase: GenerationPhase::NotStarted,
            created_at,
        }
    }

    /// Whether any world-building phase is still outstanding. A story left at
    /// `TopicsGenerated` by an interrupted run still needs elaboration.
    #[must_use]
    pub fn needs_world_building(&self) -> bool {
        self.phase != GenerationPhase::Elaborated
    }

    /// Whether the topics phase has yet to run.
    #[must_use]
    pub fn needs_topics(&self) -> bool {
        self.phase == GenerationPhase::NotStarted && self.world_builder.is_empty()
    }

    /// Stores the topics produced by the first generation phase.
    pub fn record_topics(&mut self, entries: Vec<WorldBuilderEntry>) {
        self.world_builder = entries;
        self.phase = GenerationPhase::TopicsGenerated;
    }

    /// Marks every topic as elaborated.
    pub fn mark_elaborated(&mut self) {
        self.phase = GenerationPhase::Elaborated;
    }
}
