//! Storyloom web front-end.
//!
//! Collects a story premise through an HTML form, stores the story, and runs
//! world-building generation the first time the story page is viewed.

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod views;

/// Builds the application router over `state`.
pub fn app(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::home::router())
        .merge(routes::story::router())
        .nest("/api/v1/stories", routes::stories_api::router())
        .with_state(state)
}
