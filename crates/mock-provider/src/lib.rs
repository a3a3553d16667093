//! Mock provider implementations for testing chat generation flows.
//!
//! These providers let the factory and API layers be exercised without any
//! network access:
//!
//! - [`CannedProvider`] - always returns a fixed reply
//! - [`EchoProvider`] - echoes the last user message back
//! - [`FailingProvider`] - always returns an error
//! - [`EmptyProvider`] - always reports an empty backend reply
//!
//! # Example
//!
//! ```rust
//! use mock_provider::CannedProvider;
//! use provider_core::{LlmProvider, Message};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let provider = CannedProvider::new("mock", "The answer is 42.");
//!     let completion = provider
//!         .generate(&[Message::user("What is the answer?")], None)
//!         .await
//!         .unwrap();
//!     assert_eq!(completion.content, "The answer is 42.");
//! }
//! ```

mod canned;
mod echo;
mod flaky;

pub use canned::CannedProvider;
pub use echo::EchoProvider;
pub use flaky::{EmptyProvider, FailingProvider};
