//! LLM provider capability.
//!
//! The pipeline needs exactly one thing from a provider: a single text
//! completion for a fixed system instruction plus one user message. The
//! trait keeps the orchestrator testable against scripted providers.

pub mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::error::ProviderError;

/// A text-completion capability.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send one completion request and return the model's raw text verbatim.
    /// No parsing or validation happens here.
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, ProviderError>;
}
