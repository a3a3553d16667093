//! Feedback endpoints.

use axum::extract::{Json, Query, State};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use database::{interaction, models::FeedbackType, models::Interaction};

use crate::error::ApiError;
use crate::AppState;

/// Most records returned by the history endpoint.
const MAX_HISTORY_LIMIT: i64 = 500;

/// Default history page size.
const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Feedback submission body.
#[derive(Debug, Deserialize)]
pub struct FeedbackSubmit {
    pub message_id: String,
    /// 'thumbs_up' or 'thumbs_down'
    pub feedback_type: String,
    #[serde(default)]
    pub feedback_comment: Option<String>,
}

/// Feedback submission acknowledgement.
#[derive(Debug, Serialize)]
pub struct FeedbackAck {
    pub success: bool,
    pub message: String,
    pub message_id: String,
    pub feedback_type: String,
}

/// Attach feedback to a logged message.
///
/// 400 when `feedback_type` is outside the two-value set, 404 when no
/// interaction carries the message id. Repeat submissions overwrite.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(feedback): Json<FeedbackSubmit>,
) -> Result<Json<FeedbackAck>, ApiError> {
    let Some(feedback_type) = FeedbackType::parse(&feedback.feedback_type) else {
        return Err(ApiError::BadRequest(
            "feedback_type must be 'thumbs_up' or 'thumbs_down'".to_string(),
        ));
    };

    let at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    interaction::record_feedback(
        state.db.pool(),
        &feedback.message_id,
        feedback_type,
        feedback.feedback_comment.as_deref(),
        &at,
    )
    .await?;

    info!(
        message_id = %feedback.message_id,
        feedback = %feedback_type,
        "Feedback submitted"
    );

    Ok(Json(FeedbackAck {
        success: true,
        message: "Feedback submitted successfully".to_string(),
        message_id: feedback.message_id,
        feedback_type: feedback_type.to_string(),
    }))
}

/// Query parameters for the history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub user_id: Option<String>,
    pub limit: Option<i64>,
}

/// One interaction record as served by the history endpoint.
#[derive(Debug, Serialize)]
pub struct InteractionView {
    pub id: String,
    pub message_id: String,
    pub timestamp: String,
    pub question: String,
    pub response: String,
    pub provider_used: Option<String>,
    pub feedback_type: Option<String>,
    pub feedback_comment: Option<String>,
}

impl From<Interaction> for InteractionView {
    fn from(record: Interaction) -> Self {
        Self {
            id: record.id,
            message_id: record.message_id,
            timestamp: record.created_at,
            question: record.question,
            response: record.response,
            provider_used: record.provider_used,
            feedback_type: record.feedback_type,
            feedback_comment: record.feedback_comment,
        }
    }
}

/// Recent interaction records, newest first.
pub async fn feedback_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<InteractionView>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let records = interaction::list_recent(
        state.db.pool(),
        params.user_id.as_deref().filter(|id| !id.is_empty()),
        limit,
    )
    .await?;

    Ok(Json(records.into_iter().map(InteractionView::from).collect()))
}
