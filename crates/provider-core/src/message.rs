//! Chat transcript and generation result types.

use serde::{Deserialize, Serialize};

/// Reply used when every configured provider has failed.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

/// A single message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Why a generation finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model produced a complete answer.
    Stop,
    /// The answer is a degraded stand-in produced after failures.
    Error,
}

/// The normalized result of a single generation call.
///
/// Every provider maps its backend's response shape onto this struct so the
/// rest of the service never sees provider-specific types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Completion {
    /// Generated answer text.
    pub content: String,
    /// Model that produced the answer.
    pub model: String,
    /// Provider name, as registered with the factory.
    pub provider: String,
    /// Total token count reported by the backend, if any.
    pub tokens_used: Option<u32>,
    /// Whether this is a real answer or a degraded stand-in.
    pub finish_reason: FinishReason,
}

impl Completion {
    /// Whether the completion is a real answer.
    pub fn is_success(&self) -> bool {
        self.finish_reason != FinishReason::Error
    }

    /// Build the degraded stand-in returned when generation is exhausted.
    pub fn degraded(provider: impl Into<String>) -> Self {
        Self {
            content: FALLBACK_REPLY.to_string(),
            model: String::new(),
            provider: provider.into(),
            tokens_used: None,
            finish_reason: FinishReason::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::system("s").role, "system");
        assert_eq!(Message::user("u").role, "user");
        assert_eq!(Message::assistant("a").role, "assistant");
        assert_eq!(Message::user("hello").content, "hello");
    }

    #[test]
    fn test_degraded_completion() {
        let completion = Completion::degraded("gemini");
        assert!(!completion.is_success());
        assert_eq!(completion.provider, "gemini");
        assert_eq!(completion.content, FALLBACK_REPLY);
        assert!(completion.tokens_used.is_none());
    }

    #[test]
    fn test_success_flag() {
        let completion = Completion {
            content: "ok".to_string(),
            model: "m".to_string(),
            provider: "p".to_string(),
            tokens_used: Some(12),
            finish_reason: FinishReason::Stop,
        };
        assert!(completion.is_success());
    }
}
