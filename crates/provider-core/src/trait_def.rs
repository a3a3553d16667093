//! The LlmProvider trait definition.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::message::{Completion, Message};

/// A trait for generating chat completions from an LLM backend.
///
/// Implementations can range from canned test providers to full HTTP
/// clients. This trait is object-safe and can be used with
/// `Arc<dyn LlmProvider>`.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the given transcript.
    ///
    /// # Arguments
    ///
    /// * `messages` - Prior conversation turns plus the current question.
    /// * `system_prompt` - Optional system prompt applied to the call.
    ///
    /// # Returns
    ///
    /// A [`Completion`] with the answer, or an error if generation failed.
    /// A well-formed but content-free backend reply is reported as
    /// [`ProviderError::Empty`], never as an empty `Ok`.
    async fn generate(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<Completion, ProviderError>;

    /// Get the registry name for this provider (e.g. "gemini").
    fn name(&self) -> &str;

    /// Check if the provider is ready to serve requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
