//! LLM client module
//!
//! Provides the completion client abstraction and the Groq implementation.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod groq;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use groq::GroqClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Currently only "groq" is supported; the provider field exists so a
/// config file naming anything else fails with a clear message instead
/// of silently hitting the wrong wire format.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "groq" => Ok(Arc::new(GroqClient::from_config(config)?)),
        other => Err(LlmError::InvalidResponse(format!(
            "Unknown LLM provider: '{}'. Supported: groq",
            other
        ))),
    }
}
