//! Storyloom LLM — text generation backends.
//!
//! Two interchangeable HTTP backends sit behind the
//! [`TextGenerator`](storyloom_core::generation::TextGenerator) capability:
//! a self-hosted Kobold endpoint and the Claude messages API. The backend is
//! chosen once from configuration and dispatched through [`GeneratorClient`].

pub mod backend;
pub mod claude;
pub mod error;
pub mod kobold;

#[cfg(test)]
mod test_server;

pub use backend::{Backend, GeneratorClient, LlmConfig, UnknownBackend};
pub use claude::ClaudeClient;
pub use error::LlmError;
pub use kobold::KoboldClient;
