//! Core trait and types for LLM provider implementations.
//!
//! This crate provides the shared interface for all LLM providers used by
//! the chat service. It defines:
//!
//! - [`LlmProvider`] - The trait that all provider implementations must implement
//! - [`Message`] / [`Completion`] - Chat transcript and generation result types
//! - [`ProviderError`] - Error types for provider operations
//! - [`flatten_transcript`] - Helper for providers that take a single prompt string
//!
//! # Example
//!
//! ```rust
//! use provider_core::{Completion, FinishReason, LlmProvider, Message, ProviderError};
//! use async_trait::async_trait;
//!
//! struct MyProvider;
//!
//! #[async_trait]
//! impl LlmProvider for MyProvider {
//!     async fn generate(
//!         &self,
//!         _messages: &[Message],
//!         _system_prompt: Option<&str>,
//!     ) -> Result<Completion, ProviderError> {
//!         Ok(Completion {
//!             content: "Hello!".to_string(),
//!             model: "my-model".to_string(),
//!             provider: "mine".to_string(),
//!             tokens_used: None,
//!             finish_reason: FinishReason::Stop,
//!         })
//!     }
//!
//!     fn name(&self) -> &str {
//!         "mine"
//!     }
//! }
//! ```

mod error;
mod message;
mod prompt;
mod trait_def;

pub use error::ProviderError;
pub use message::{Completion, FinishReason, Message, FALLBACK_REPLY};
pub use prompt::flatten_transcript;
pub use trait_def::LlmProvider;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
