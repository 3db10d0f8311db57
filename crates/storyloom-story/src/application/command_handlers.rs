//! Command handlers for the story context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the story, run generation, persist the
//! updated record.

use storyloom_core::clock::Clock;
use storyloom_core::error::DomainError;
use storyloom_core::generation::TextGenerator;
use storyloom_core::repository::StoryRepository;
use storyloom_core::story::Story;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::locks::GenerationLocks;
use crate::domain::commands::{CreateStory, GenerateWorld};
use crate::domain::world_builder::{
    Elaboration, elaboration_prompt, entry_count, parse_elaboration, parse_topics, topics_prompt,
};

async fn load(story_id: Uuid, repo: &dyn StoryRepository) -> Result<Story, DomainError> {
    repo.get(story_id)
        .await?
        .ok_or(DomainError::StoryNotFound(story_id))
}

/// Handles the `CreateStory` command: validates the premise, assigns a fresh
/// identifier, and stores the new story. Generation does not start here.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the target length is zero.
/// Returns `DomainError::Infrastructure` if the store fails.
#[instrument(skip(command, clock, repo), fields(correlation_id = %command.correlation_id))]
pub async fn handle_create_story(
    command: &CreateStory,
    clock: &dyn Clock,
    repo: &dyn StoryRepository,
) -> Result<Story, DomainError> {
    if command.details.target_length == 0 {
        return Err(DomainError::Validation(
            "target_length must be a positive integer".into(),
        ));
    }

    let story = Story::new(Uuid::new_v4(), command.details.clone(), clock.now());
    repo.put(story.clone()).await?;

    info!(story_id = %story.id, target_length = story.target_length, "created story");

    Ok(story)
}

/// Handles the `GenerateWorld` command: runs both world-building phases the
/// first time it is called for a story and returns the current record.
///
/// Phase one requests a topic list sized by the target length; phase two
/// elaborates each parsed topic with one sequential generation call. The
/// story is saved after each phase. A story stored at `TopicsGenerated`
/// (its previous run was dropped mid elaboration) resumes at phase two.
/// Once elaborated, later calls return the stored story without calling the
/// generator. Concurrent calls for the same story are serialized through
/// `locks`, so each phase runs once.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if the story does not exist.
/// Returns `DomainError::Infrastructure` if the store fails.
#[instrument(
    skip(command, generator, repo, locks),
    fields(correlation_id = %command.correlation_id, story_id = %command.story_id)
)]
pub async fn handle_generate_world(
    command: &GenerateWorld,
    generator: &dyn TextGenerator,
    repo: &dyn StoryRepository,
    locks: &GenerationLocks,
) -> Result<Story, DomainError> {
    let story = load(command.story_id, repo).await?;
    if !story.needs_world_building() {
        return Ok(story);
    }

    let _guard = locks.acquire(command.story_id).await;

    // Another request may have finished generation while we waited.
    let mut story = load(command.story_id, repo).await?;
    if !story.needs_world_building() {
        debug!("world already generated by a concurrent request");
        return Ok(story);
    }

    if story.needs_topics() {
        let requested = entry_count(story.target_length);
        let topics = generator.generate(&topics_prompt(&story, requested)).await;
        let entries = parse_topics(&topics);
        info!(requested, parsed = entries.len(), "generated world-building topics");

        story.record_topics(entries);
        repo.put(story.clone()).await?;
    } else {
        info!(entries = story.world_builder.len(), "resuming elaboration of stored topics");
    }

    for entry in &mut story.world_builder {
        let response = generator.generate(&elaboration_prompt(entry)).await;
        let Elaboration {
            description,
            keywords,
        } = parse_elaboration(&response);
        debug!(category = %entry.category, keywords = keywords.len(), "elaborated entry");
        entry.elaborate(description, keywords);
    }

    story.mark_elaborated();
    repo.put(story.clone()).await?;

    info!(entries = story.world_builder.len(), "world building complete");

    Ok(story)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use storyloom_core::clock::Clock;
    use storyloom_core::error::DomainError;
    use storyloom_core::repository::StoryRepository;
    use storyloom_core::story::{GenerationPhase, StoryDetails, WorldBuilderEntry};
    use storyloom_store::InMemoryStoryRepository;
    use storyloom_test_support::{FailingStoryRepository, FixedClock, ScriptedGenerator};
    use uuid::Uuid;

    use crate::application::command_handlers::{handle_create_story, handle_generate_world};
    use crate::application::locks::GenerationLocks;
    use crate::domain::commands::{CreateStory, GenerateWorld};

    const TOPICS: &str = "1. Magic System: Power waxes with the moon.\n\
                          Some chatter without a separator\n\
                          2. Political Structure: Five guilds rule from the shadows.\n";

    fn details(target_length: u32) -> StoryDetails {
        StoryDetails {
            prompt: "A lighthouse keeper finds a map".into(),
            main_character_desc: "Old, stubborn, curious".into(),
            target_length,
            world_guide: "Coastal, rainy".into(),
            genre: "Mystery".into(),
            tone: "Brooding".into(),
            style: "Spare".into(),
        }
    }

    async fn create(repo: &InMemoryStoryRepository, target_length: u32) -> Uuid {
        let command = CreateStory {
            correlation_id: Uuid::new_v4(),
            details: details(target_length),
        };
        handle_create_story(&command, &FixedClock::standard(), repo)
            .await
            .unwrap()
            .id
    }

    fn generate_command(story_id: Uuid) -> GenerateWorld {
        GenerateWorld {
            correlation_id: Uuid::new_v4(),
            story_id,
        }
    }

    fn pipeline_generator() -> ScriptedGenerator {
        ScriptedGenerator::responding(|prompt| {
            if prompt.contains("world-building topics") {
                TOPICS.to_owned()
            } else if prompt.contains("Topic: Magic System") {
                "The moon governs all spellcraft.\nKeywords: moon, tide, spell, cycle".to_owned()
            } else {
                "The guilds meet in secret.".to_owned()
            }
        })
    }

    #[tokio::test]
    async fn test_handle_create_story_stores_new_story() {
        // Arrange
        let clock = FixedClock::standard();
        let repo = InMemoryStoryRepository::new();
        let command = CreateStory {
            correlation_id: Uuid::new_v4(),
            details: details(5000),
        };

        // Act
        let story = handle_create_story(&command, &clock, &repo).await.unwrap();

        // Assert
        let stored = repo.get(story.id).await.unwrap().unwrap();
        assert_eq!(stored, story);
        assert_eq!(stored.prompt, "A lighthouse keeper finds a map");
        assert_eq!(stored.phase, GenerationPhase::NotStarted);
        assert_eq!(stored.created_at, clock.now());
    }

    #[tokio::test]
    async fn test_handle_create_story_assigns_distinct_ids() {
        let repo = InMemoryStoryRepository::new();

        let first = create(&repo, 1000).await;
        let second = create(&repo, 1000).await;

        assert_ne!(first, second);
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_handle_create_story_rejects_zero_length() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let command = CreateStory {
            correlation_id: Uuid::new_v4(),
            details: details(0),
        };

        // Act
        let result = handle_create_story(&command, &FixedClock::standard(), &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_handle_create_story_propagates_store_failure() {
        let command = CreateStory {
            correlation_id: Uuid::new_v4(),
            details: details(1000),
        };

        let result =
            handle_create_story(&command, &FixedClock::standard(), &FailingStoryRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_handle_generate_world_runs_both_phases() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let story_id = create(&repo, 5000).await;
        let generator = pipeline_generator();

        // Act
        let story = handle_generate_world(
            &generate_command(story_id),
            &generator,
            &repo,
            &GenerationLocks::new(),
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(story.phase, GenerationPhase::Elaborated);
        assert_eq!(
            story.world_builder,
            vec![
                WorldBuilderEntry {
                    category: "Magic System".into(),
                    description: "The moon governs all spellcraft.".into(),
                    keywords: vec!["moon".into(), "tide".into(), "spell".into(), "cycle".into()],
                },
                WorldBuilderEntry {
                    category: "Political Structure".into(),
                    description: "The guilds meet in secret.".into(),
                    keywords: vec![],
                },
            ]
        );
        assert_eq!(repo.get(story_id).await.unwrap().unwrap(), story);

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("a list of 8 world-building topics"));
        assert!(prompts[1].contains("Topic: Magic System"));
        assert!(prompts[1].contains("Initial Idea: Power waxes with the moon."));
        assert!(prompts[2].contains("Topic: Political Structure"));
    }

    #[tokio::test]
    async fn test_handle_generate_world_is_idempotent() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let story_id = create(&repo, 5000).await;
        let generator = pipeline_generator();
        let locks = GenerationLocks::new();
        let first = handle_generate_world(&generate_command(story_id), &generator, &repo, &locks)
            .await
            .unwrap();

        // Act
        let second = handle_generate_world(&generate_command(story_id), &generator, &repo, &locks)
            .await
            .unwrap();

        // Assert
        assert_eq!(generator.call_count(), 3);
        assert_eq!(first.world_builder, second.world_builder);
    }

    #[tokio::test]
    async fn test_handle_generate_world_bakes_error_text_into_story() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let story_id = create(&repo, 1000).await;
        let error_text = "Error: Could not connect to the Claude AI API.";
        let generator = ScriptedGenerator::responding(move |_| error_text.to_owned());

        // Act
        let story = handle_generate_world(
            &generate_command(story_id),
            &generator,
            &repo,
            &GenerationLocks::new(),
        )
        .await
        .unwrap();

        // Assert
        assert_eq!(story.world_builder.len(), 1);
        assert_eq!(story.world_builder[0].category, "Error");
        assert_eq!(story.world_builder[0].description, error_text);
        assert!(story.world_builder[0].keywords.is_empty());
    }

    #[tokio::test]
    async fn test_handle_generate_world_with_no_parsable_topics_runs_once() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let story_id = create(&repo, 1000).await;
        let generator = ScriptedGenerator::sequence(["nothing useful here"]);
        let locks = GenerationLocks::new();

        // Act
        let first = handle_generate_world(&generate_command(story_id), &generator, &repo, &locks)
            .await
            .unwrap();
        let second = handle_generate_world(&generate_command(story_id), &generator, &repo, &locks)
            .await
            .unwrap();

        // Assert
        assert!(first.world_builder.is_empty());
        assert_eq!(first.phase, GenerationPhase::Elaborated);
        assert_eq!(second.phase, GenerationPhase::Elaborated);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_handle_generate_world_resumes_elaboration_after_dropped_run() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let story_id = create(&repo, 5000).await;
        let generator = pipeline_generator().with_delay(Duration::from_millis(50));
        let locks = GenerationLocks::new();
        let interrupted = tokio::time::timeout(
            Duration::from_millis(75),
            handle_generate_world(&generate_command(story_id), &generator, &repo, &locks),
        )
        .await;
        assert!(interrupted.is_err());
        let stored = repo.get(story_id).await.unwrap().unwrap();
        assert_eq!(stored.phase, GenerationPhase::TopicsGenerated);

        // Act
        let story = handle_generate_world(&generate_command(story_id), &generator, &repo, &locks)
            .await
            .unwrap();

        // Assert
        assert_eq!(story.phase, GenerationPhase::Elaborated);
        assert_eq!(story.world_builder.len(), 2);
        assert_eq!(story.world_builder[0].description, "The moon governs all spellcraft.");
        assert_eq!(story.world_builder[1].description, "The guilds meet in secret.");
        assert_eq!(repo.get(story_id).await.unwrap().unwrap(), story);
        let topic_calls = generator
            .prompts()
            .iter()
            .filter(|p| p.contains("world-building topics"))
            .count();
        assert_eq!(topic_calls, 1);
    }

    #[tokio::test]
    async fn test_handle_generate_world_returns_not_found_for_unknown_story() {
        let repo = InMemoryStoryRepository::new();
        let generator = ScriptedGenerator::sequence(Vec::<String>::new());
        let story_id = Uuid::new_v4();

        let result = handle_generate_world(
            &generate_command(story_id),
            &generator,
            &repo,
            &GenerationLocks::new(),
        )
        .await;

        assert!(matches!(result, Err(DomainError::StoryNotFound(id)) if id == story_id));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_first_views_generate_once() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let story_id = create(&repo, 500).await;
        let generator = pipeline_generator().with_delay(Duration::from_millis(10));
        let locks = GenerationLocks::new();

        // Act
        let first_command = generate_command(story_id);
        let second_command = generate_command(story_id);
        let (first, second) = tokio::join!(
            handle_generate_world(&first_command, &generator, &repo, &locks),
            handle_generate_world(&second_command, &generator, &repo, &locks),
        );

        // Assert
        let first = first.unwrap();
        let second = second.unwrap();
        let topic_calls = generator
            .prompts()
            .iter()
            .filter(|p| p.contains("world-building topics"))
            .count();
        assert_eq!(topic_calls, 1);
        assert_eq!(generator.call_count(), 3);
        assert_eq!(first.world_builder, second.world_builder);
        assert_eq!(second.phase, GenerationPhase::Elaborated);
    }
}
