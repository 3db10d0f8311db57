//! Client for a self-hosted Kobold text generation endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use storyloom_core::generation::TextGenerator;
use tracing::{debug, error, instrument};

use crate::error::LlmError;

const GENERATE_PATH: &str = "/api/v1/generate";

const MAX_CONTEXT_LENGTH: u32 = 6000;
const MAX_LENGTH: u32 = 500;
const REP_PEN: f32 = 1.1;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

const UNEXPECTED_FORMAT: &str = "Error: Received an unexpected response format from Kobold AI.";

/// Request body for `POST /api/v1/generate`.
#[derive(Debug, Serialize)]
struct KoboldRequest<'a> {
    prompt: &'a str,
    max_context_length: u32,
    max_length: u32,
    rep_pen: f32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct KoboldResponse {
    results: Vec<KoboldResult>,
}

#[derive(Debug, Deserialize)]
struct KoboldResult {
    text: String,
}

/// HTTP client for a single Kobold instance.
#[derive(Debug, Clone)]
pub struct KoboldClient {
    client: Client,
    base_url: String,
}

impl KoboldClient {
    /// Create a client for the Kobold instance at `base_url`,
    /// e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    /// The full URL generation requests are posted to.
    #[must_use]
    pub fn generate_url(&self) -> String {
        format!("{}{GENERATE_PATH}", self.base_url)
    }

    /// Send `prompt` and return the first generated text.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Request` on transport failure, `LlmError::Status`
    /// for a non-2xx response, and `LlmError::Decode` or
    /// `LlmError::MissingField` if the body lacks `results[0].text`.
    #[instrument(skip(self, prompt), fields(url = %self.generate_url()))]
    pub async fn try_generate(&self, prompt: &str) -> Result<String, LlmError> {
        let payload = KoboldRequest {
            prompt,
            max_context_length: MAX_CONTEXT_LENGTH,
            max_length: MAX_LENGTH,
            rep_pen: REP_PEN,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        };

        debug!(prompt_len = prompt.len(), "sending prompt to Kobold");

        let response = self
            .client
            .post(self.generate_url())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: KoboldResponse = serde_json::from_str(&body)?;

        parsed
            .results
            .into_iter()
            .next()
            .map(|result| result.text)
            .ok_or(LlmError::MissingField("results[0].text"))
    }

    fn describe(&self, err: &LlmError) -> String {
        match err {
            LlmError::Request(_) | LlmError::Status { .. } | LlmError::MissingApiKey => format!(
                "Error: Could not connect to Kobold AI at {}. Please ensure it is running.",
                self.generate_url()
            ),
            LlmError::Decode(_) | LlmError::MissingField(_) => UNEXPECTED_FORMAT.to_owned(),
        }
    }
}

#[async_trait]
impl TextGenerator for KoboldClient {
    async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "Kobold generation failed");
                self.describe(&err)
            }
        }
    }
}
