//! Factory configuration from environment variables.

use std::env;
use std::sync::Arc;

use gemini_provider::GeminiProvider;
use openai_provider::OpenAiProvider;
use provider_core::LlmProvider;
use tracing::{info, warn};

use crate::factory::LlmFactory;

/// Default provider priority order.
const DEFAULT_PROVIDERS: &str = "gemini,openai";

/// Configuration for building an [`LlmFactory`].
#[derive(Debug, Clone)]
pub struct FactoryConfig {
    /// Provider names in priority order.
    pub providers: Vec<String>,
    /// Default provider name; first listed when unset.
    pub default: Option<String>,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            providers: DEFAULT_PROVIDERS
                .split(',')
                .map(|s| s.to_string())
                .collect(),
            default: None,
        }
    }
}

impl FactoryConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `LLM_PROVIDERS` - comma-separated priority order (default: "gemini,openai")
    /// - `LLM_DEFAULT_PROVIDER` - default provider name (default: first listed)
    pub fn from_env() -> Self {
        let providers = env::var("LLM_PROVIDERS")
            .unwrap_or_else(|_| DEFAULT_PROVIDERS.to_string())
            .split(',')
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        let default = env::var("LLM_DEFAULT_PROVIDER")
            .ok()
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty());

        Self { providers, default }
    }

    /// Build the factory, constructing each listed provider from its own
    /// environment configuration.
    ///
    /// A listed provider whose configuration fails (e.g. a missing API key)
    /// is skipped with a warning; the factory is built from the rest. With
    /// nothing buildable the factory is empty and every generation call
    /// reports `NoProviders`.
    pub fn build(&self) -> LlmFactory {
        let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::new();

        for name in &self.providers {
            match name.as_str() {
                "gemini" => match GeminiProvider::from_env() {
                    Ok(provider) => providers.push(Arc::new(provider)),
                    Err(err) => warn!(error = %err, "Skipping gemini provider"),
                },
                "openai" => match OpenAiProvider::from_env() {
                    Ok(provider) => providers.push(Arc::new(provider)),
                    Err(err) => warn!(error = %err, "Skipping openai provider"),
                },
                other => warn!("Unknown provider {:?} in LLM_PROVIDERS, skipping", other),
            }
        }

        info!(
            configured = self.providers.len(),
            built = providers.len(),
            "Built provider registry"
        );

        let factory = LlmFactory::new(providers);
        match &self.default {
            Some(name) => factory.with_default(name),
            None => factory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priority_order() {
        let config = FactoryConfig::default();
        assert_eq!(config.providers, vec!["gemini", "openai"]);
        assert!(config.default.is_none());
    }
}
