//! JSON read API for stories.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;
use uuid::Uuid;

use storyloom_story::application::query_handlers::{self, StoryView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{story_id}
///
/// Returns the stored story as-is; never triggers generation.
#[instrument(skip(state))]
async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<Uuid>,
) -> Result<Json<StoryView>, ApiError> {
    let view = query_handlers::get_story_by_id(story_id, state.story_repository.as_ref()).await?;
    Ok(Json(view))
}

/// Returns the router for the stories API.
pub fn router() -> Router<AppState> {
    Router::new().route("/{story_id}", get(get_story))
}
