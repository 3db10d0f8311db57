//! Shared test helpers for web integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use storyloom_llm::Backend;
use storyloom_store::InMemoryStoryRepository;
use storyloom_test_support::{FixedClock, ScriptedGenerator};
use tower::ServiceExt;

use storyloom_web::state::AppState;

/// Build the full app router over an empty in-memory store and the given
/// generator. Uses the same route structure as `main.rs`.
pub fn build_test_app(generator: Arc<ScriptedGenerator>) -> Router {
    let state = AppState::new(
        Arc::new(FixedClock::standard()),
        Backend::Kobold,
        generator,
        Arc::new(InMemoryStoryRepository::new()),
    );
    storyloom_web::app(state)
}

/// A generator that answers topic prompts with `topics` and every
/// elaboration prompt with a paragraph naming the topic.
pub fn topic_generator(topics: &'static str) -> Arc<ScriptedGenerator> {
    Arc::new(topic_responder(topics))
}

/// Like [`topic_generator`], but every call sleeps for `delay` first so
/// concurrent requests overlap.
pub fn slow_topic_generator(topics: &'static str, delay: Duration) -> Arc<ScriptedGenerator> {
    Arc::new(topic_responder(topics).with_delay(delay))
}

fn topic_responder(topics: &'static str) -> ScriptedGenerator {
    ScriptedGenerator::responding(move |prompt| {
        if prompt.contains("world-building topics") {
            return topics.to_owned();
        }
        let topic = prompt
            .lines()
            .find_map(|line| line.strip_prefix("Topic: "))
            .unwrap_or("unknown");
        format!("All about {topic}.\nKeywords: {topic}, lore, place, people")
    })
}

/// Submit the story form and return the redirect location.
pub async fn submit_story(app: Router, form: &str) -> (StatusCode, Option<String>) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_owned()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_owned());

    (status, location)
}

/// Send a GET request and return the response body as text.
pub async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

/// Send a GET request and return the response body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get_text(app, uri).await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();

    (status, json)
}
