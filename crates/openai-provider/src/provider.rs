//! OpenAiProvider implementation.

use provider_core::{
    async_trait, Completion, FinishReason, LlmProvider, Message, ProviderError,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, WireMessage};
use crate::config::OpenAiConfig;

/// Registry name for this provider.
pub const PROVIDER_NAME: &str = "openai";

/// A provider that talks to an OpenAI-compatible chat-completions backend.
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a new OpenAiProvider with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().build().map_err(|e| {
            ProviderError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!("OpenAiProvider initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create an OpenAiProvider from environment variables.
    ///
    /// See [`OpenAiConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Build the wire message list for a chat completion request.
    fn build_messages(&self, messages: &[Message], system_prompt: Option<&str>) -> Vec<WireMessage> {
        let mut wire = Vec::with_capacity(messages.len() + 1);

        if let Some(system) = system_prompt {
            wire.push(WireMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }

        for message in messages {
            wire.push(WireMessage {
                role: message.role.clone(),
                content: message.content.clone(),
            });
        }

        wire
    }

    /// Make a chat completion request to the backend.
    async fn chat_completion(
        &self,
        messages: Vec<WireMessage>,
    ) -> Result<ChatCompletionResponse, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending chat completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Prefer the structured error message when the body parses
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&error_text) {
                return Err(ProviderError::Api {
                    status: status.as_u16(),
                    message: body.error.message,
                });
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        let wire = self.build_messages(messages, system_prompt);
        let completion = self.chat_completion(wire).await?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::Empty)?
            .to_string();

        let tokens_used = completion.usage.as_ref().map(|usage| usage.total_tokens);
        if let Some(tokens) = tokens_used {
            debug!("Token usage: {}", tokens);
        }

        Ok(Completion {
            content,
            model: completion.model,
            provider: PROVIDER_NAME.to_string(),
            tokens_used,
            finish_reason: FinishReason::Stop,
        })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> OpenAiProvider {
        let config = OpenAiConfig::builder().api_key("test-key").build();
        OpenAiProvider::new(config).unwrap()
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(test_provider().name(), PROVIDER_NAME);
    }

    #[test]
    fn test_build_messages_with_system_prompt() {
        let provider = test_provider();
        let messages = vec![Message::user("hi"), Message::assistant("hello")];

        let wire = provider.build_messages(&messages, Some("Be brief."));
        assert_eq!(wire.len(), 3);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[0].content, "Be brief.");
        assert_eq!(wire[1].role, "user");
        assert_eq!(wire[2].role, "assistant");
    }

    #[test]
    fn test_build_messages_without_system_prompt() {
        let provider = test_provider();
        let wire = provider.build_messages(&[Message::user("hi")], None);

        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].role, "user");
    }
}
