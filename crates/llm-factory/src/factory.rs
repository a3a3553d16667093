//! The LlmFactory type and its fallback loop.

use std::sync::Arc;

use provider_core::{Completion, LlmProvider, Message, ProviderError};
use tracing::{debug, info, warn};

use crate::error::FactoryError;

/// Registry of LLM providers with ordered fallback.
///
/// Providers are held in configured priority order. The first registered
/// provider is the default unless overridden with [`LlmFactory::with_default`].
pub struct LlmFactory {
    providers: Vec<Arc<dyn LlmProvider>>,
    default_name: Option<String>,
}

impl LlmFactory {
    /// Create a factory from providers in priority order.
    ///
    /// The first provider becomes the default.
    pub fn new(providers: Vec<Arc<dyn LlmProvider>>) -> Self {
        let default_name = providers.first().map(|p| p.name().to_string());

        info!(
            providers = providers.len(),
            default = default_name.as_deref().unwrap_or("none"),
            "LLM factory initialized"
        );

        Self {
            providers,
            default_name,
        }
    }

    /// Override the default provider by name.
    ///
    /// An unregistered name is ignored with a warning.
    pub fn with_default(mut self, name: &str) -> Self {
        if self.provider(name).is_some() {
            self.default_name = Some(name.to_string());
        } else {
            warn!("Unknown default provider {:?}, keeping current default", name);
        }
        self
    }

    /// Look up a provider by registry name.
    pub fn provider(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(Arc::clone)
    }

    /// The configured default provider, if any providers are registered.
    pub fn default_provider(&self) -> Option<Arc<dyn LlmProvider>> {
        self.default_name
            .as_deref()
            .and_then(|name| self.provider(name))
    }

    /// Names of all registered providers, in priority order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Build the attempt order for one call.
    ///
    /// Preferred first (when registered), then the default, then the rest
    /// in registry order, without duplicates. An unknown preferred name is
    /// skipped with a warning rather than treated as an error.
    fn attempt_order(&self, preferred: Option<&str>) -> Vec<Arc<dyn LlmProvider>> {
        let mut order: Vec<Arc<dyn LlmProvider>> = Vec::with_capacity(self.providers.len());
        let push = |provider: Arc<dyn LlmProvider>, order: &mut Vec<Arc<dyn LlmProvider>>| {
            if !order.iter().any(|p| p.name() == provider.name()) {
                order.push(provider);
            }
        };

        if let Some(name) = preferred {
            match self.provider(name) {
                Some(provider) => push(provider, &mut order),
                None => warn!("Requested provider {:?} is not registered", name),
            }
        }

        if let Some(provider) = self.default_provider() {
            push(provider, &mut order);
        }

        for provider in &self.providers {
            push(Arc::clone(provider), &mut order);
        }

        order
    }

    /// Generate a completion, falling back across providers on failure.
    ///
    /// An `Err` from a provider and an empty reply are treated the same:
    /// the next provider in the attempt order gets the call. When every
    /// attempt fails, the last failure is returned as
    /// [`FactoryError::Exhausted`].
    pub async fn generate_with_fallback(
        &self,
        messages: &[Message],
        system_prompt: Option<&str>,
        preferred: Option<&str>,
    ) -> Result<Completion, FactoryError> {
        let order = self.attempt_order(preferred);
        if order.is_empty() {
            return Err(FactoryError::NoProviders);
        }

        let mut last: Option<(String, ProviderError)> = None;

        for provider in order {
            let name = provider.name().to_string();

            if !provider.is_ready().await {
                warn!(provider = %name, "Provider not ready, skipping");
                last = Some((
                    name,
                    ProviderError::Configuration("provider not ready".to_string()),
                ));
                continue;
            }

            debug!(provider = %name, "Attempting generation");

            match provider.generate(messages, system_prompt).await {
                Ok(completion) if !completion.content.trim().is_empty() => {
                    debug!(provider = %name, "Generation succeeded");
                    return Ok(completion);
                }
                Ok(_) => {
                    warn!(provider = %name, "Provider returned empty content, falling back");
                    last = Some((name, ProviderError::Empty));
                }
                Err(err) => {
                    warn!(provider = %name, error = %err, "Provider failed, falling back");
                    last = Some((name, err));
                }
            }
        }

        match last {
            Some((provider, source)) => Err(FactoryError::Exhausted { provider, source }),
            None => Err(FactoryError::NoProviders),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_provider::{CannedProvider, EmptyProvider, FailingProvider};

    fn factory_of(providers: Vec<Arc<dyn LlmProvider>>) -> LlmFactory {
        LlmFactory::new(providers)
    }

    #[tokio::test]
    async fn test_first_provider_wins() {
        let factory = factory_of(vec![
            Arc::new(CannedProvider::new("alpha", "from alpha")),
            Arc::new(CannedProvider::new("beta", "from beta")),
        ]);

        let completion = factory
            .generate_with_fallback(&[Message::user("q")], None, None)
            .await
            .unwrap();

        assert_eq!(completion.provider, "alpha");
        assert_eq!(completion.content, "from alpha");
    }

    #[tokio::test]
    async fn test_preferred_provider_used_when_registered() {
        let factory = factory_of(vec![
            Arc::new(CannedProvider::new("alpha", "from alpha")),
            Arc::new(CannedProvider::new("beta", "from beta")),
        ]);

        let completion = factory
            .generate_with_fallback(&[Message::user("q")], None, Some("beta"))
            .await
            .unwrap();

        assert_eq!(completion.provider, "beta");
    }

    #[tokio::test]
    async fn test_unknown_preferred_falls_back_to_default() {
        let factory = factory_of(vec![Arc::new(CannedProvider::new("alpha", "ok"))]);

        let completion = factory
            .generate_with_fallback(&[Message::user("q")], None, Some("nope"))
            .await
            .unwrap();

        assert_eq!(completion.provider, "alpha");
    }

    #[tokio::test]
    async fn test_error_falls_back_to_next() {
        let factory = factory_of(vec![
            Arc::new(FailingProvider::new("broken")),
            Arc::new(CannedProvider::new("backup", "saved")),
        ]);

        let completion = factory
            .generate_with_fallback(&[Message::user("q")], None, None)
            .await
            .unwrap();

        assert_eq!(completion.provider, "backup");
        assert_eq!(completion.content, "saved");
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back_to_next() {
        let factory = factory_of(vec![
            Arc::new(EmptyProvider::new("hollow")),
            Arc::new(CannedProvider::new("backup", "saved")),
        ]);

        let completion = factory
            .generate_with_fallback(&[Message::user("q")], None, None)
            .await
            .unwrap();

        assert_eq!(completion.provider, "backup");
    }

    #[tokio::test]
    async fn test_exhausted_surfaces_last_failure() {
        let factory = factory_of(vec![
            Arc::new(FailingProvider::new("first")),
            Arc::new(FailingProvider::new("second")),
        ]);

        let err = factory
            .generate_with_fallback(&[Message::user("q")], None, None)
            .await
            .unwrap_err();

        match err {
            FactoryError::Exhausted { ref provider, .. } => assert_eq!(provider, "second"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_providers() {
        let factory = factory_of(vec![]);
        let err = factory
            .generate_with_fallback(&[Message::user("q")], None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, FactoryError::NoProviders));
        assert!(err.last_provider().is_none());
    }

    #[tokio::test]
    async fn test_with_default_changes_attempt_order() {
        let factory = factory_of(vec![
            Arc::new(CannedProvider::new("alpha", "from alpha")),
            Arc::new(CannedProvider::new("beta", "from beta")),
        ])
        .with_default("beta");

        let completion = factory
            .generate_with_fallback(&[Message::user("q")], None, None)
            .await
            .unwrap();

        assert_eq!(completion.provider, "beta");
    }

    #[test]
    fn test_attempt_order_has_no_duplicates() {
        let factory = factory_of(vec![
            Arc::new(CannedProvider::new("alpha", "a")),
            Arc::new(CannedProvider::new("beta", "b")),
        ]);

        let order = factory.attempt_order(Some("beta"));
        let names: Vec<&str> = order.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_provider_lookup() {
        let factory = factory_of(vec![Arc::new(CannedProvider::new("alpha", "a"))]);

        assert!(factory.provider("alpha").is_some());
        assert!(factory.provider("missing").is_none());
        assert_eq!(factory.provider_names(), vec!["alpha"]);
        assert_eq!(factory.default_provider().unwrap().name(), "alpha");
    }
}
