//! Backend selection and dispatch.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use storyloom_core::generation::TextGenerator;
use thiserror::Error;
use tracing::info;

use crate::claude::ClaudeClient;
use crate::kobold::KoboldClient;

/// The text generation services Storyloom can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// A self-hosted Kobold instance.
    #[default]
    Kobold,
    /// The hosted Claude messages API.
    Claude,
}

impl Backend {
    /// Configuration tag for this backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kobold => "kobold",
            Self::Claude => "claude",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend tag that names no known backend.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown text generation backend: {0:?} (expected \"kobold\" or \"claude\")")]
pub struct UnknownBackend(pub String);

impl FromStr for Backend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kobold" => Ok(Self::Kobold),
            "claude" => Ok(Self::Claude),
            _ => Err(UnknownBackend(s.to_owned())),
        }
    }
}

/// Settings needed to construct a generation client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which backend handles generation.
    pub backend: Backend,
    /// Base URL of the Kobold instance.
    pub kobold_url: String,
    /// Claude API key, if any.
    pub claude_api_key: Option<String>,
    /// Claude model identifier.
    pub claude_model: String,
}

/// The configured backend, dispatched through [`TextGenerator`].
#[derive(Debug, Clone)]
pub enum GeneratorClient {
    /// Generation through Kobold.
    Kobold(KoboldClient),
    /// Generation through Claude.
    Claude(ClaudeClient),
}

impl GeneratorClient {
    /// Build the client selected by `config`.
    #[must_use]
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = Client::new();
        info!(backend = %config.backend, "configuring text generation backend");
        match config.backend {
            Backend::Kobold => Self::Kobold(KoboldClient::with_client(client, &config.kobold_url)),
            Backend::Claude => Self::Claude(ClaudeClient::with_client(
                client,
                config.claude_api_key.clone(),
                &config.claude_model,
            )),
        }
    }

    /// Which backend this client talks to.
    #[must_use]
    pub fn backend(&self) -> Backend {
        match self {
            Self::Kobold(_) => Backend::Kobold,
            Self::Claude(_) => Backend::Claude,
        }
    }
}

#[async_trait]
impl TextGenerator for GeneratorClient {
    async fn generate(&self, prompt: &str) -> String {
        match self {
            Self::Kobold(client) => client.generate(prompt).await,
            Self::Claude(client) => client.generate(prompt).await,
        }
    }
}
