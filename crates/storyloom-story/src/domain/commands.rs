//! Commands for the story context.

use storyloom_core::story::StoryDetails;
use uuid::Uuid;

/// Command to create a story from a submitted premise.
#[derive(Debug, Clone)]
pub struct CreateStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The submitted premise.
    pub details: StoryDetails,
}

/// Command to run world-building generation for a story if it has not run yet.
#[derive(Debug, Clone)]
pub struct GenerateWorld {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story to generate for.
    pub story_id: Uuid,
}
