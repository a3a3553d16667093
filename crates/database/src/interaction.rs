//! Interaction log operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{FeedbackType, Interaction};

const ALL_COLUMNS: &str = "id, user_id, session_id, message_id, created_at, question, \
     response, provider_used, tokens_used, feedback_type, feedback_comment, feedback_at";

/// Log a new chat turn.
///
/// The feedback columns of `record` are expected to be `None`; they are
/// filled in later by [`record_feedback`].
pub async fn create_interaction(pool: &SqlitePool, record: &Interaction) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO feedback_interactions
            (id, user_id, session_id, message_id, created_at, question,
             response, provider_used, tokens_used, feedback_type,
             feedback_comment, feedback_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.id)
    .bind(&record.user_id)
    .bind(&record.session_id)
    .bind(&record.message_id)
    .bind(&record.created_at)
    .bind(&record.question)
    .bind(&record.response)
    .bind(&record.provider_used)
    .bind(record.tokens_used)
    .bind(&record.feedback_type)
    .bind(&record.feedback_comment)
    .bind(&record.feedback_at)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Interaction",
                    id: record.message_id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Get an interaction by its message ID.
pub async fn get_by_message_id(pool: &SqlitePool, message_id: &str) -> Result<Interaction> {
    sqlx::query_as::<_, Interaction>(&format!(
        "SELECT {ALL_COLUMNS} FROM feedback_interactions WHERE message_id = ?"
    ))
    .bind(message_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Interaction",
        id: message_id.to_string(),
    })
}

/// Record feedback for a message.
///
/// Overwrites any prior feedback for the same message (last write wins).
/// Returns `NotFound` when no interaction has the given message ID.
pub async fn record_feedback(
    pool: &SqlitePool,
    message_id: &str,
    feedback_type: FeedbackType,
    comment: Option<&str>,
    at: &str,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE feedback_interactions
        SET feedback_type = ?, feedback_comment = ?, feedback_at = ?
        WHERE message_id = ?
        "#,
    )
    .bind(feedback_type.as_str())
    .bind(comment)
    .bind(at)
    .bind(message_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Interaction",
            id: message_id.to_string(),
        });
    }

    Ok(())
}

/// List recent interactions, newest first.
///
/// Filters by user when `user_id` is given.
pub async fn list_recent(
    pool: &SqlitePool,
    user_id: Option<&str>,
    limit: i64,
) -> Result<Vec<Interaction>> {
    let records = match user_id {
        Some(user_id) => {
            sqlx::query_as::<_, Interaction>(&format!(
                "SELECT {ALL_COLUMNS} FROM feedback_interactions \
                 WHERE user_id = ? ORDER BY created_at DESC LIMIT ?"
            ))
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Interaction>(&format!(
                "SELECT {ALL_COLUMNS} FROM feedback_interactions \
                 ORDER BY created_at DESC LIMIT ?"
            ))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(records)
}

/// Count total interactions.
pub async fn count_interactions(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedback_interactions")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Count interactions grouped by feedback type.
///
/// Rows without feedback are reported under the label "none".
pub async fn count_by_feedback_type(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT COALESCE(feedback_type, 'none') AS feedback, COUNT(*) as count
        FROM feedback_interactions
        GROUP BY feedback
        ORDER BY count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
