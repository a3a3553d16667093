//! CSV export of the interaction log.

use std::io::Write;

use sqlx::SqlitePool;
use tracing::info;

use crate::error::Result;
use crate::models::Interaction;

/// Column order of the exported CSV.
const HEADER: [&str; 12] = [
    "id",
    "user_id",
    "session_id",
    "message_id",
    "created_at",
    "question",
    "response",
    "provider_used",
    "tokens_used",
    "feedback_type",
    "feedback_comment",
    "feedback_at",
];

/// Export the interaction log as CSV, newest first.
///
/// By default operator test traffic (user ids containing `test`, `verify`,
/// or `direct`) is excluded; pass `include_test_records` to keep it.
/// Returns the number of data rows written.
pub async fn export_csv<W: Write>(
    pool: &SqlitePool,
    out: &mut W,
    include_test_records: bool,
) -> Result<usize> {
    let query = if include_test_records {
        "SELECT id, user_id, session_id, message_id, created_at, question, \
         response, provider_used, tokens_used, feedback_type, feedback_comment, feedback_at \
         FROM feedback_interactions ORDER BY created_at DESC"
    } else {
        "SELECT id, user_id, session_id, message_id, created_at, question, \
         response, provider_used, tokens_used, feedback_type, feedback_comment, feedback_at \
         FROM feedback_interactions \
         WHERE user_id NOT LIKE '%test%' \
           AND user_id NOT LIKE '%verify%' \
           AND user_id NOT LIKE '%direct%' \
         ORDER BY created_at DESC"
    };

    let records = sqlx::query_as::<_, Interaction>(query).fetch_all(pool).await?;

    writeln!(out, "{}", HEADER.join(","))?;
    for record in &records {
        writeln!(out, "{}", csv_row(record))?;
    }

    info!(
        rows = records.len(),
        include_test_records, "Exported interaction log"
    );

    Ok(records.len())
}

fn csv_row(record: &Interaction) -> String {
    [
        csv_field(&record.id),
        csv_field(&record.user_id),
        csv_field(&record.session_id),
        csv_field(&record.message_id),
        csv_field(&record.created_at),
        csv_field(&record.question),
        csv_field(&record.response),
        csv_field(record.provider_used.as_deref().unwrap_or("")),
        record
            .tokens_used
            .map(|tokens| tokens.to_string())
            .unwrap_or_default(),
        csv_field(record.feedback_type.as_deref().unwrap_or("")),
        csv_field(record.feedback_comment.as_deref().unwrap_or("")),
        csv_field(record.feedback_at.as_deref().unwrap_or("")),
    ]
    .join(",")
}

/// Quote a field when it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::create_interaction;
    use crate::Database;

    fn record(message_id: &str, user_id: &str, question: &str) -> Interaction {
        Interaction {
            id: format!("row-{}", message_id),
            user_id: user_id.to_string(),
            session_id: "session_1c9f3ab02d4e".to_string(),
            message_id: message_id.to_string(),
            created_at: "2026-08-07T10:00:00Z".to_string(),
            question: question.to_string(),
            response: "answer".to_string(),
            provider_used: Some("gemini".to_string()),
            tokens_used: None,
            feedback_type: None,
            feedback_comment: None,
            feedback_at: None,
        }
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[tokio::test]
    async fn test_export_excludes_test_traffic_by_default() {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        create_interaction(db.pool(), &record("msg_aaa111bbb222", "alice", "q"))
            .await
            .unwrap();
        create_interaction(db.pool(), &record("msg_ccc333ddd444", "test-user", "q"))
            .await
            .unwrap();

        let mut out = Vec::new();
        let rows = export_csv(db.pool(), &mut out, false).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(rows, 1);
        assert!(text.starts_with("id,user_id,"));
        assert!(text.contains("alice"));
        assert!(!text.contains("test-user"));
    }

    #[tokio::test]
    async fn test_export_includes_test_traffic_on_request() {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        create_interaction(db.pool(), &record("msg_ccc333ddd444", "test-user", "q"))
            .await
            .unwrap();

        let mut out = Vec::new();
        let rows = export_csv(db.pool(), &mut out, true).await.unwrap();

        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_export_quotes_embedded_commas() {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        create_interaction(
            db.pool(),
            &record("msg_aaa111bbb222", "alice", "what, exactly, is ownership?"),
        )
        .await
        .unwrap();

        let mut out = Vec::new();
        export_csv(db.pool(), &mut out, false).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("\"what, exactly, is ownership?\""));
    }
}
