//! Errors raised while talking to a generation backend.
//!
//! These never leave the crate through [`TextGenerator`]; each client turns
//! them into the error text it hands back in place of generated output.
//!
//! [`TextGenerator`]: storyloom_core::generation::TextGenerator

use thiserror::Error;

/// Failure modes of a single generation request.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The backend requires an API key and none was configured.
    #[error("API key is not configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("backend returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body was not valid JSON of the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded but lacked the generated text.
    #[error("response is missing {0}")]
    MissingField(&'static str),
}
