//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One logged chat turn with its optional feedback annotation.
///
/// `message_id` is globally unique and is the handle by which a later
/// feedback submission locates the row. Only the three feedback columns
/// are ever mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Interaction {
    /// Row UUID.
    pub id: String,
    /// User identifier; "anonymous" when the caller sent none.
    pub user_id: String,
    /// Session identifier.
    pub session_id: String,
    /// Unique message identifier, the feedback-submission key.
    pub message_id: String,
    /// Creation timestamp, RFC 3339 UTC.
    pub created_at: String,
    /// Question text.
    pub question: String,
    /// Response text.
    pub response: String,
    /// Provider that produced the response, if generation succeeded.
    pub provider_used: Option<String>,
    /// Token count reported by the provider.
    pub tokens_used: Option<i64>,
    /// Feedback classification, if submitted.
    pub feedback_type: Option<String>,
    /// Free-text feedback comment.
    pub feedback_comment: Option<String>,
    /// When feedback was submitted, RFC 3339 UTC.
    pub feedback_at: Option<String>,
}

/// The two accepted feedback classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    ThumbsUp,
    ThumbsDown,
}

impl FeedbackType {
    /// The stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::ThumbsUp => "thumbs_up",
            FeedbackType::ThumbsDown => "thumbs_down",
        }
    }

    /// Parse the submitted string form; anything outside the two-value set
    /// is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "thumbs_up" => Some(FeedbackType::ThumbsUp),
            "thumbs_down" => Some(FeedbackType::ThumbsDown),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_type_parse() {
        assert_eq!(FeedbackType::parse("thumbs_up"), Some(FeedbackType::ThumbsUp));
        assert_eq!(
            FeedbackType::parse("thumbs_down"),
            Some(FeedbackType::ThumbsDown)
        );
        assert_eq!(FeedbackType::parse("meh"), None);
        assert_eq!(FeedbackType::parse(""), None);
        assert_eq!(FeedbackType::parse("THUMBS_UP"), None);
    }

    #[test]
    fn test_feedback_type_round_trip() {
        for feedback in [FeedbackType::ThumbsUp, FeedbackType::ThumbsDown] {
            assert_eq!(FeedbackType::parse(feedback.as_str()), Some(feedback));
        }
    }
}
