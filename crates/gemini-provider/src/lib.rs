//! Google Gemini provider.
//!
//! This crate provides an [`LlmProvider`] implementation backed by the
//! Gemini `generateContent` REST API.
//!
//! The transcript is flattened into a single prompt string (system prompt,
//! then `User:` / `Assistant:` turns) and sent as one user content part -
//! the same pattern the service has always used with Gemini.
//!
//! # Example
//!
//! ```rust,no_run
//! use gemini_provider::GeminiProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::from_env()?;
//!     // Register with the factory...
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod provider;

pub use config::GeminiConfig;
pub use provider::GeminiProvider;

// Re-export provider-core types for convenience
pub use provider_core::{async_trait, Completion, LlmProvider, Message, ProviderError};
