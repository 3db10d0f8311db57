//! Client for the Claude messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use storyloom_core::generation::TextGenerator;
use tracing::{debug, error, instrument};

use crate::error::LlmError;

const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";
const CLAUDE_API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ClaudeMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ClaudeMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    #[serde(default)]
    content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Claude API client.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl ClaudeClient {
    /// Creates a new Claude client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Claude API key; requests are refused locally without one
    /// * `model` - Model identifier (e.g., "claude-3-opus-20240229")
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key, model)
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: Client, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            model: model.into(),
            endpoint: CLAUDE_API_URL.to_owned(),
        }
    }

    /// Point the client at a different messages endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The configured model identifier.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` as a single user message and return the first text block.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingApiKey` without sending anything when no key
    /// is configured, `LlmError::Request`/`LlmError::Status` for transport and
    /// HTTP failures, `LlmError::Decode` for a non-JSON body, and
    /// `LlmError::MissingField` when `content[0].text` is absent.
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub async fn try_generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let payload = ClaudeRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(prompt_len = prompt.len(), "sending prompt to Claude");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", CLAUDE_API_VERSION)
            .header("content-type", "application/json")
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
        let parsed: ClaudeResponse = serde_json::from_str(&body)?;

        parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(LlmError::MissingField("content[0].text"))
    }
}

fn describe(err: &LlmError) -> &'static str {
    match err {
        LlmError::MissingApiKey => "Error: Claude AI API key is not set in the configuration.",
        LlmError::Request(_) | LlmError::Status { .. } => {
            "Error: Could not connect to the Claude AI API."
        }
        LlmError::Decode(_) => "Error: Received an unexpected response format from Claude AI.",
        LlmError::MissingField(_) => "Error: Could not parse Claude response.",
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "Claude generation failed");
                describe(&err).to_owned()
            }
        }
    }
}
