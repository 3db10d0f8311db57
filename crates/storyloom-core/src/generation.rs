//! Text generation capability.

use async_trait::async_trait;

/// A backend that turns a prompt into generated text.
///
/// Implementations never fail: transport, status, and response-shape problems
/// are reported as a human-readable error string in place of the generated
/// text, so callers can treat every result as content.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> String;
}
