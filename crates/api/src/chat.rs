//! Chat endpoints: generation, streaming, and session history.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::response::sse::{Event, Sse};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio_stream::Stream;
use tracing::{error, info, warn};
use uuid::Uuid;

use database::{interaction, models::Interaction};
use provider_core::{Completion, Message};
use retrieval::SourceRef;

use crate::error::ApiError;
use crate::sessions::{SessionEntry, SessionSnapshot};
use crate::AppState;

/// Conversation turns from the request body included in the prompt.
const HISTORY_WINDOW: usize = 6;

/// Longest accepted question.
const MAX_MESSAGE_CHARS: usize = 4000;

/// Longest accepted session identifier.
const MAX_SESSION_ID_CHARS: usize = 64;

/// Character budget per SSE chunk.
const CHUNK_CHARS: usize = 64;

/// One conversation turn as sent by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryMessage>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub sources: Vec<SourceRef>,
    pub session_id: String,
    pub success: bool,
    pub provider_used: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    pub message_id: String,
}

/// Answer a question with retrieved context.
///
/// Persistence is best-effort: a failed interaction write is logged and the
/// response is returned anyway. Exhausted generation degrades to a
/// `success: false` reply rather than an HTTP error.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    validate_request(&request)?;

    let session_id = request
        .session_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(new_session_id);
    let user_id = request
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .unwrap_or("anonymous")
        .to_string();

    info!(session_id = %session_id, user_id = %user_id, "Chat request");

    let context = state.index.retrieve(&request.message);
    let transcript = build_transcript(
        &request.conversation_history,
        answer_prompt(&context.context, &request.message),
    );

    let completion = match state
        .factory
        .generate_with_fallback(
            &transcript,
            state.config.system_prompt.as_deref(),
            request.provider.as_deref().filter(|p| !p.is_empty()),
        )
        .await
    {
        Ok(completion) => completion,
        Err(err) => {
            warn!(error = %err, "Generation exhausted, returning degraded response");
            Completion::degraded(err.last_provider().unwrap_or("none"))
        }
    };
    let success = completion.is_success();

    let message_id = new_message_id();
    let now = Utc::now();
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    let record = Interaction {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.clone(),
        session_id: session_id.clone(),
        message_id: message_id.clone(),
        created_at: timestamp.clone(),
        question: request.message.clone(),
        response: completion.content.clone(),
        provider_used: Some(completion.provider.clone()),
        tokens_used: completion.tokens_used.map(i64::from),
        feedback_type: None,
        feedback_comment: None,
        feedback_at: None,
    };

    // Best-effort: the caller still gets the answer when the write fails.
    if let Err(err) = interaction::create_interaction(state.db.pool(), &record).await {
        error!(error = %err, message_id = %message_id, "Failed to store interaction");
    }

    let user_entry = SessionEntry {
        id: new_entry_id(),
        role: "user".to_string(),
        content: request.message.clone(),
        timestamp: timestamp.clone(),
        provider: None,
    };
    let assistant_entry = SessionEntry {
        id: message_id.clone(),
        role: "assistant".to_string(),
        content: completion.content.clone(),
        timestamp,
        provider: Some(completion.provider.clone()),
    };
    state
        .sessions
        .record_exchange(&session_id, now, user_entry, assistant_entry)
        .await;

    // Expired-session sweep rides on the request, off the response path.
    let sessions = Arc::clone(&state.sessions);
    tokio::spawn(async move {
        sessions.evict_expired(Utc::now()).await;
    });

    Ok(Json(ChatResponse {
        response: completion.content,
        sources: context.sources,
        session_id,
        success,
        provider_used: completion.provider,
        tokens_used: completion.tokens_used,
        message_id,
    }))
}

/// SSE variant: text chunks terminated by a `[DONE]` sentinel.
///
/// Uses the preferred provider when given, else the default; this path does
/// not run the fallback loop and does not persist the turn.
pub async fn chat_stream(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    validate_request(&request)?;

    let provider = match request.provider.as_deref().filter(|p| !p.is_empty()) {
        Some(name) => state.factory.provider(name),
        None => state.factory.default_provider(),
    };

    let events = match provider {
        None => error_events("No provider available"),
        Some(provider) => {
            let context = state.index.retrieve(&request.message);
            let transcript = build_transcript(
                &request.conversation_history,
                stream_prompt(&context.context, &request.message),
            );

            match provider
                .generate(&transcript, state.config.system_prompt.as_deref())
                .await
            {
                Ok(completion) => chunk_events(&completion.content),
                Err(err) => {
                    warn!(provider = provider.name(), error = %err, "Streaming generation failed");
                    error_events(&err.to_string())
                }
            }
        }
    };

    Ok(Sse::new(tokio_stream::iter(
        events.into_iter().map(Ok::<_, Infallible>),
    )))
}

/// Get the transcript for a session.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, ApiError> {
    state
        .sessions
        .snapshot(&session_id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("Session not found"))
}

/// Delete a session's transcript.
pub async fn delete_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.sessions.remove(&session_id).await {
        Ok(Json(serde_json::json!({
            "message": "History deleted successfully"
        })))
    } else {
        Err(ApiError::NotFound("Session not found"))
    }
}

fn validate_request(request: &ChatRequest) -> Result<(), ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message cannot be empty".to_string()));
    }

    if request.message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "message is too long (max {} chars)",
            MAX_MESSAGE_CHARS
        )));
    }

    if let Some(session_id) = request.session_id.as_deref().filter(|id| !id.is_empty()) {
        let well_formed = session_id.chars().count() <= MAX_SESSION_ID_CHARS
            && session_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !well_formed {
            return Err(ApiError::BadRequest("invalid session_id".to_string()));
        }
    }

    Ok(())
}

/// The last [`HISTORY_WINDOW`] client turns plus the context-bearing question.
fn build_transcript(history: &[HistoryMessage], prompt: String) -> Vec<Message> {
    let skip = history.len().saturating_sub(HISTORY_WINDOW);
    let mut transcript: Vec<Message> = history
        .iter()
        .skip(skip)
        .map(|turn| Message {
            role: turn.role.clone(),
            content: turn.content.clone(),
        })
        .collect();

    transcript.push(Message::user(prompt));
    transcript
}

fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "Context information:\n{context}\n\n\
         Based on the above context, please answer the following question:\n\n\
         Question: {question}\n\nAnswer:"
    )
}

fn stream_prompt(context: &str, question: &str) -> String {
    format!("Context: {context}\n\nQuestion: {question}\n\nAnswer:")
}

/// Split the answer into word-boundary chunks and close with the sentinel.
fn chunk_events(content: &str) -> Vec<Event> {
    let mut events: Vec<Event> = chunk_text(content, CHUNK_CHARS)
        .into_iter()
        .map(|chunk| Event::default().data(chunk))
        .collect();
    events.push(Event::default().data("[DONE]"));
    events
}

fn error_events(message: &str) -> Vec<Event> {
    vec![
        Event::default().data(format!("Error: {}", message)),
        Event::default().data("[DONE]"),
    ]
}

fn chunk_text(content: &str, budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in content.split_inclusive(char::is_whitespace) {
        if !current.is_empty() && current.chars().count() + word.chars().count() > budget {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn new_session_id() -> String {
    format!("session_{}", &Uuid::new_v4().simple().to_string()[..12])
}

fn new_message_id() -> String {
    format!("msg_{}", &Uuid::new_v4().simple().to_string()[..12])
}

fn new_entry_id() -> String {
    format!("user_{}", &Uuid::new_v4().simple().to_string()[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str, session_id: Option<&str>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            conversation_history: Vec::new(),
            session_id: session_id.map(str::to_string),
            provider: None,
            user_id: None,
        }
    }

    #[test]
    fn test_validate_rejects_blank_message() {
        assert!(validate_request(&request("", None)).is_err());
        assert!(validate_request(&request("   \n", None)).is_err());
        assert!(validate_request(&request("hello", None)).is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_message() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(validate_request(&request(&long, None)).is_err());

        let at_limit = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(validate_request(&request(&at_limit, None)).is_ok());
    }

    #[test]
    fn test_validate_session_id_charset() {
        assert!(validate_request(&request("hi", Some("session_1c9f3ab02d4e"))).is_ok());
        assert!(validate_request(&request("hi", Some("has spaces"))).is_err());
        assert!(validate_request(&request("hi", Some("semi;colon"))).is_err());

        let long = "a".repeat(MAX_SESSION_ID_CHARS + 1);
        assert!(validate_request(&request("hi", Some(&long))).is_err());

        // Empty session id means "mint one", not an error
        assert!(validate_request(&request("hi", Some(""))).is_ok());
    }

    #[test]
    fn test_id_formats() {
        let session = new_session_id();
        let message = new_message_id();
        let entry = new_entry_id();

        assert!(session.starts_with("session_"));
        assert_eq!(session.len(), "session_".len() + 12);
        assert!(message.starts_with("msg_"));
        assert_eq!(message.len(), "msg_".len() + 12);
        assert!(entry.starts_with("user_"));
        assert_eq!(entry.len(), "user_".len() + 8);

        assert_ne!(new_message_id(), new_message_id());
    }

    #[test]
    fn test_build_transcript_window() {
        let history: Vec<HistoryMessage> = (0..10)
            .map(|n| HistoryMessage {
                role: if n % 2 == 0 { "user" } else { "assistant" }.to_string(),
                content: format!("turn {}", n),
            })
            .collect();

        let transcript = build_transcript(&history, "the question".to_string());

        // Last six history turns plus the prompt itself
        assert_eq!(transcript.len(), HISTORY_WINDOW + 1);
        assert_eq!(transcript[0].content, "turn 4");
        assert_eq!(transcript.last().unwrap().content, "the question");
        assert_eq!(transcript.last().unwrap().role, "user");
    }

    #[test]
    fn test_answer_prompt_contains_context_and_question() {
        let prompt = answer_prompt("some context", "the question");
        assert!(prompt.starts_with("Context information:\nsome context"));
        assert!(prompt.contains("Question: the question"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_chunk_text_respects_budget() {
        let content = "alpha beta gamma delta epsilon zeta eta theta";
        let chunks = chunk_text(content, 16);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 16 + "epsilon ".len());
        }
        assert_eq!(chunks.concat(), content);
    }

    #[test]
    fn test_chunk_text_empty() {
        assert!(chunk_text("", 16).is_empty());
    }
}
