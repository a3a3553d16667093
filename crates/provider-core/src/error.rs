//! Error types for provider operations.

use thiserror::Error;

/// Errors that can occur during a generation call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider is misconfigured (missing key, bad URL, etc.).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the backend or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The backend answered successfully but produced no content.
    ///
    /// Treated like a failure by the fallback loop: the next provider
    /// gets a chance to answer instead.
    #[error("empty response")]
    Empty,
}
