//! GeminiProvider implementation.

use provider_core::{
    async_trait, flatten_transcript, Completion, FinishReason, LlmProvider, Message,
    ProviderError,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{
    ApiErrorBody, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiConfig;

/// Registry name for this provider.
pub const PROVIDER_NAME: &str = "gemini";

/// A provider backed by the Gemini `generateContent` REST API.
///
/// The transcript is flattened into one prompt string and sent as a single
/// user content part; Gemini's reply comes back in the first candidate.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create a new GeminiProvider with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().build().map_err(|e| {
            ProviderError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        info!("GeminiProvider initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a GeminiProvider from environment variables.
    ///
    /// See [`GeminiConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ProviderError> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Make a `generateContent` request to the backend.
    async fn generate_content(
        &self,
        prompt: String,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig {
                max_output_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            }),
        };

        debug!("Sending generateContent request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
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
impl LlmProvider for GeminiProvider {
    async fn generate(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        let prompt = flatten_transcript(messages, system_prompt);
        let response = self.generate_content(prompt).await?;

        let content = response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.trim())
            .filter(|text| !text.is_empty())
            .ok_or(ProviderError::Empty)?
            .to_string();

        let tokens_used = response
            .usage_metadata
            .and_then(|usage| usage.total_token_count);
        if let Some(tokens) = tokens_used {
            debug!("Token usage: {}", tokens);
        }

        debug!("Generated {} chars", content.len());

        Ok(Completion {
            content,
            model: self.config.model.clone(),
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

    #[test]
    fn test_provider_name() {
        let config = GeminiConfig::builder().api_key("test-key").build();
        let provider = GeminiProvider::new(config).unwrap();
        assert_eq!(provider.name(), PROVIDER_NAME);
    }

    #[test]
    fn test_prompt_flattening_matches_transcript() {
        let messages = vec![
            Message::user("What is Rust?"),
            Message::assistant("A systems language."),
            Message::user("And Cargo?"),
        ];
        let prompt = flatten_transcript(&messages, Some("Answer briefly."));

        assert!(prompt.starts_with("Answer briefly."));
        assert!(prompt.contains("User: What is Rust?"));
        assert!(prompt.contains("Assistant: A systems language."));
        assert!(prompt.ends_with("User: And Cargo?"));
    }
}
