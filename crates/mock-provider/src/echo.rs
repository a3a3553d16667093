//! Echo provider - repeats the last user message.

use async_trait::async_trait;

use provider_core::{Completion, FinishReason, LlmProvider, Message, ProviderError};

/// A provider that echoes the last user message back.
///
/// Lets tests assert on exactly what prompt text reached the provider.
#[derive(Debug, Clone, Default)]
pub struct EchoProvider {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoProvider {
    /// Create a new EchoProvider with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoProvider with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl LlmProvider for EchoProvider {
    async fn generate(
        &self,
        messages: &[Message],
        _system_prompt: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|message| message.role == "user")
            .ok_or(ProviderError::Empty)?;

        let content = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, last_user.content),
            None => last_user.content.clone(),
        };

        Ok(Completion {
            content,
            model: "echo".to_string(),
            provider: self.name().to_string(),
            tokens_used: None,
            finish_reason: FinishReason::Stop,
        })
    }

    fn name(&self) -> &str {
        "echo"
    }
}
