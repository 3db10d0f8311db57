//! Story submission form.

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::{Form, Router, routing::get};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use storyloom_core::story::StoryDetails;
use storyloom_story::application::command_handlers;
use storyloom_story::domain::commands;

use crate::error::PageError;
use crate::state::AppState;
use crate::views;

/// Form body for POST /.
#[derive(Debug, Deserialize)]
pub struct StoryForm {
    /// Free-text story prompt.
    #[serde(default)]
    pub prompt: String,
    /// Description of the main character.
    #[serde(default)]
    pub main_character_desc: String,
    /// Target length in words.
    pub target_length: u32,
    /// World guide text.
    #[serde(default)]
    pub world_guide: String,
    /// Genre.
    #[serde(default)]
    pub genre: String,
    /// Tone.
    #[serde(default)]
    pub tone: String,
    /// Prose style.
    #[serde(default)]
    pub style: String,
}

impl From<StoryForm> for StoryDetails {
    fn from(form: StoryForm) -> Self {
        Self {
            prompt: form.prompt,
            main_character_desc: form.main_character_desc,
            target_length: form.target_length,
            world_guide: form.world_guide,
            genre: form.genre,
            tone: form.tone,
            style: form.style,
        }
    }
}

/// GET /
async fn index() -> Html<String> {
    Html(views::index_page())
}

/// POST /
///
/// Stores the story and redirects to its page; generation starts when that
/// page is first viewed.
#[instrument(skip(state, form), fields(target_length = form.target_length))]
async fn create_story(
    State(state): State<AppState>,
    Form(form): Form<StoryForm>,
) -> Result<Redirect, PageError> {
    let command = commands::CreateStory {
        correlation_id: Uuid::new_v4(),
        details: form.into(),
    };

    info!(correlation_id = %command.correlation_id, "handling create_story command");

    let story = command_handlers::handle_create_story(
        &command,
        state.clock.as_ref(),
        state.story_repository.as_ref(),
    )
    .await?;

    Ok(Redirect::to(&format!("/story/{}", story.id)))
}

/// Returns the router for the submission form.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index).post(create_story))
}
