//! Provider registry and fallback generation loop.
//!
//! This crate provides the [`LlmFactory`] type which selects among the
//! configured LLM providers for each generation call.
//!
//! # Fallback behavior
//!
//! For each call the factory builds an attempt order - the caller-preferred
//! provider if specified and registered, then the configured default, then
//! every remaining provider in configured priority order - and tries each
//! until one returns a non-empty completion. An error or an empty reply
//! moves on to the next provider; only when every attempt has failed is the
//! last failure surfaced as [`FactoryError::Exhausted`].
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_factory::{FactoryConfig, LlmFactory};
//! use provider_core::Message;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let factory = FactoryConfig::from_env().build();
//!
//!     let completion = factory
//!         .generate_with_fallback(&[Message::user("hello")], None, None)
//!         .await?;
//!
//!     println!("{} said: {}", completion.provider, completion.content);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod factory;

pub use config::FactoryConfig;
pub use error::FactoryError;
pub use factory::LlmFactory;

// Re-export commonly used types from provider-core
pub use provider_core::{Completion, LlmProvider, Message, ProviderError};
