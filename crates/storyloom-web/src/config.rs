//! Server configuration loaded from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use storyloom_llm::claude::DEFAULT_MODEL;
use storyloom_llm::{Backend, LlmConfig};

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5555;
const DEFAULT_KOBOLD_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_CLAUDE_WAIT_SECS: u64 = 4 * 60 * 60;

/// Runtime configuration for the web server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Generation backend settings.
    pub llm: LlmConfig,
    /// How long to wait on Claude rate limits. Read but not yet acted on.
    pub claude_wait_duration: Duration,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Load configuration from the process environment, after reading a
    /// `.env` file if one is present.
    ///
    /// | Env Var                       | Default                  |
    /// |-------------------------------|--------------------------|
    /// | `HOST`                        | `0.0.0.0`                |
    /// | `PORT`                        | `5555`                   |
    /// | `LLM_BACKEND`                 | `kobold`                 |
    /// | `KOBOLD_AI_URL`               | `http://127.0.0.1:5000`  |
    /// | `CLAUDE_AI_API_KEY`           | unset                    |
    /// | `CLAUDE_AI_MODEL`             | `claude-3-opus-20240229` |
    /// | `CLAUDE_AI_WAIT_DURATION`     | `14400` (seconds)        |
    /// | `OTEL_EXPORTER_OTLP_ENDPOINT` | unset                    |
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from `lookup`, which maps a variable name to its
    /// value. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a value is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        let backend = match var("LLM_BACKEND") {
            Some(raw) => raw
                .parse::<Backend>()
                .map_err(|e| AppError::Config(e.to_string()))?,
            None => Backend::default(),
        };

        let claude_wait_secs = match var("CLAUDE_AI_WAIT_DURATION") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!(
                    "CLAUDE_AI_WAIT_DURATION must be a whole number of seconds: {e}"
                ))
            })?,
            None => DEFAULT_CLAUDE_WAIT_SECS,
        };

        let llm = LlmConfig {
            backend,
            kobold_url: var("KOBOLD_AI_URL").unwrap_or_else(|| DEFAULT_KOBOLD_URL.to_owned()),
            claude_api_key: var("CLAUDE_AI_API_KEY"),
            claude_model: var("CLAUDE_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
        };

        Ok(Self {
            host,
            port,
            llm,
            claude_wait_duration: Duration::from_secs(claude_wait_secs),
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5555);
        assert_eq!(config.llm.backend, Backend::Kobold);
        assert_eq!(config.llm.kobold_url, "http://127.0.0.1:5000");
        assert!(config.llm.claude_api_key.is_none());
        assert_eq!(config.llm.claude_model, "claude-3-opus-20240229");
        assert_eq!(config.claude_wait_duration, Duration::from_secs(14_400));
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.bind_addr().unwrap().port(), 5555);
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("LLM_BACKEND", "Claude"),
            ("KOBOLD_AI_URL", "http://gpu-box:5001"),
            ("CLAUDE_AI_API_KEY", "sk-test"),
            ("CLAUDE_AI_MODEL", "claude-3-haiku-20240307"),
            ("CLAUDE_AI_WAIT_DURATION", "60"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://collector:4317"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.llm.backend, Backend::Claude);
        assert_eq!(config.llm.kobold_url, "http://gpu-box:5001");
        assert_eq!(config.llm.claude_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.claude_model, "claude-3-haiku-20240307");
        assert_eq!(config.claude_wait_duration, Duration::from_secs(60));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://collector:4317"));
    }

    #[test]
    fn test_empty_api_key_counts_as_unset() {
        let config = config_from(&[("CLAUDE_AI_API_KEY", "")]).unwrap();

        assert!(config.llm.claude_api_key.is_none());
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let result = config_from(&[("LLM_BACKEND", "gpt")]);

        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("gpt")));
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_non_numeric_wait_duration() {
        assert!(matches!(
            config_from(&[("CLAUDE_AI_WAIT_DURATION", "4h")]),
            Err(AppError::Config(_))
        ));
    }
}
