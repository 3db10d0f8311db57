//! Storyloom web — error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use storyloom_core::error::DomainError;
use thiserror::Error;

use crate::views;

/// Startup and runtime errors for the web server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration value is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Tracing or exporter setup failed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

fn classify(err: &DomainError) -> (StatusCode, &'static str) {
    match err {
        DomainError::StoryNotFound(_) => (StatusCode::NOT_FOUND, "story_not_found"),
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::Infrastructure(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
        }
    }
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// JSON error for the API routes.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = classify(&self.0);

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// HTML error page for the browser-facing routes.
#[derive(Debug)]
pub struct PageError {
    status: StatusCode,
    message: String,
}

impl PageError {
    /// A 404 page with `message`.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// The status code this page is served with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for PageError {
    fn from(err: DomainError) -> Self {
        let (status, _) = classify(&err);
        let message = match err {
            DomainError::StoryNotFound(_) => "That story does not exist.".to_owned(),
            DomainError::Infrastructure(_) => "Something went wrong on our side.".to_owned(),
            DomainError::Validation(message) => message,
        };
        Self { status, message }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let page = views::error_page(self.status, &self.message);
        (self.status, Html(page)).into_response()
    }
}
