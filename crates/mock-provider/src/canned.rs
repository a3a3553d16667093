//! Canned provider - always returns a fixed reply.

use async_trait::async_trait;

use provider_core::{Completion, FinishReason, LlmProvider, Message, ProviderError};

/// A provider that always returns the same reply.
///
/// Useful for testing the request flow without any generation logic.
#[derive(Debug, Clone)]
pub struct CannedProvider {
    name: String,
    reply: String,
    tokens_used: Option<u32>,
}

impl CannedProvider {
    /// Create a new CannedProvider with the given name and reply.
    pub fn new(name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: reply.into(),
            tokens_used: None,
        }
    }

    /// Report a token count alongside the canned reply.
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens_used = Some(tokens);
        self
    }
}

#[async_trait]
impl LlmProvider for CannedProvider {
    async fn generate(
        &self,
        _messages: &[Message],
        _system_prompt: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        Ok(Completion {
            content: self.reply.clone(),
            model: "canned".to_string(),
            provider: self.name.clone(),
            tokens_used: self.tokens_used,
            finish_reason: FinishReason::Stop,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
