//! Providers that fail on purpose, for exercising the fallback loop.

use async_trait::async_trait;

use provider_core::{Completion, LlmProvider, Message, ProviderError};

/// A provider whose every call fails with an API error.
#[derive(Debug, Clone)]
pub struct FailingProvider {
    name: String,
}

impl FailingProvider {
    /// Create a new FailingProvider with the given registry name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl LlmProvider for FailingProvider {
    async fn generate(
        &self,
        _messages: &[Message],
        _system_prompt: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        Err(ProviderError::Api {
            status: 500,
            message: format!("{} is down", self.name),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A provider whose every call reports an empty backend reply.
#[derive(Debug, Clone)]
pub struct EmptyProvider {
    name: String,
}

impl EmptyProvider {
    /// Create a new EmptyProvider with the given registry name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl LlmProvider for EmptyProvider {
    async fn generate(
        &self,
        _messages: &[Message],
        _system_prompt: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        Err(ProviderError::Empty)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = FailingProvider::new("broken");
        let result = provider.generate(&[Message::user("hi")], None).await;

        match result {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert!(message.contains("broken"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_provider() {
        let provider = EmptyProvider::new("hollow");
        let result = provider.generate(&[Message::user("hi")], None).await;

        assert!(matches!(result, Err(ProviderError::Empty)));
        assert_eq!(provider.name(), "hollow");
    }
}
