//! OpenAI-compatible chat-completions provider.
//!
//! This crate provides an [`LlmProvider`] implementation that talks to any
//! backend exposing the OpenAI `/v1/chat/completions` wire shape.
//!
//! # Features
//!
//! - Role-tagged message list with a leading system message
//! - Token usage reporting from the `usage` block
//! - Configurable via environment variables
//!
//! # Example
//!
//! ```rust,no_run
//! use openai_provider::OpenAiProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = OpenAiProvider::from_env()?;
//!     // Register with the factory...
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod provider;

pub use config::OpenAiConfig;
pub use provider::OpenAiProvider;

// Re-export provider-core types for convenience
pub use provider_core::{async_trait, Completion, LlmProvider, Message, ProviderError};
