//! Story page.

use axum::extract::{Path, State};
use axum::response::Html;
use axum::{Router, routing::get};
use tracing::{info, instrument};
use uuid::Uuid;

use storyloom_story::application::command_handlers;
use storyloom_story::application::query_handlers::StoryView;
use storyloom_story::domain::commands;

use crate::error::PageError;
use crate::state::AppState;
use crate::views;

/// GET /story/{story_id}
///
/// Runs world-building generation on the first view, then renders the story.
#[instrument(skip(state))]
async fn show_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let story_id = Uuid::parse_str(&story_id)
        .map_err(|_| PageError::not_found("That story does not exist."))?;

    let command = commands::GenerateWorld {
        correlation_id: Uuid::new_v4(),
        story_id,
    };

    info!(correlation_id = %command.correlation_id, "handling generate_world command");

    let story = command_handlers::handle_generate_world(
        &command,
        state.generator.as_ref(),
        state.story_repository.as_ref(),
        &state.generation_locks,
    )
    .await?;

    Ok(Html(views::story_page(&StoryView::from(story))))
}

/// Returns the router for story pages.
pub fn router() -> Router<AppState> {
    Router::new().route("/story/{story_id}", get(show_story))
}
