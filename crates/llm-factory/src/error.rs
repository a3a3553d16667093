//! Error types for factory operations.

use provider_core::ProviderError;
use thiserror::Error;

/// Errors that can occur during fallback generation.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// No providers are registered at all.
    #[error("no providers configured")]
    NoProviders,

    /// Every attempted provider failed; carries the last failure.
    #[error("all providers failed, last was {provider}: {source}")]
    Exhausted {
        /// Name of the last provider attempted.
        provider: String,
        /// The error that provider returned.
        #[source]
        source: ProviderError,
    },
}

impl FactoryError {
    /// Name of the last provider attempted, if any.
    pub fn last_provider(&self) -> Option<&str> {
        match self {
            FactoryError::NoProviders => None,
            FactoryError::Exhausted { provider, .. } => Some(provider),
        }
    }
}
